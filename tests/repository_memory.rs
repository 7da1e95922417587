use std::collections::HashSet;
use std::sync::Arc;

use qrlink::application::services::LinkService;
use qrlink::domain::entities::NewShortLink;
use qrlink::domain::repositories::ShortLinkRepository;
use qrlink::error::AppError;
use qrlink::infrastructure::persistence::MemoryShortLinkRepository;

fn new_link(code: &str, url: &str) -> NewShortLink {
    NewShortLink {
        name: "Test".to_string(),
        short_code: code.to_string(),
        target_url: url.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = MemoryShortLinkRepository::new();

    let link = repo
        .create(new_link("AbCd1234", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.click_count, 0);
    assert_eq!(repo.find_by_id(link.id).await.unwrap(), Some(link.clone()));
    assert_eq!(repo.find_by_code("AbCd1234").await.unwrap(), Some(link));
    assert_eq!(repo.find_by_code("missing1").await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_code_is_conflict() {
    let repo = MemoryShortLinkRepository::new();
    repo.create(new_link("AbCd1234", "https://one.example.com"))
        .await
        .unwrap();

    let result = repo
        .create(new_link("AbCd1234", "https://two.example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));

    let stored = repo.find_by_code("AbCd1234").await.unwrap().unwrap();
    assert_eq!(stored.target_url, "https://one.example.com");
}

#[tokio::test]
async fn test_update_target_preserves_other_fields() {
    let repo = MemoryShortLinkRepository::new();
    let link = repo
        .create(new_link("AbCd1234", "https://old.example.com"))
        .await
        .unwrap();
    repo.increment_clicks("AbCd1234").await.unwrap();

    let updated = repo
        .update_target_url(link.id, "https://new.example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.target_url, "https://new.example.com");
    assert_eq!(updated.short_code, link.short_code);
    assert_eq!(updated.created_at, link.created_at);
    assert_eq!(updated.click_count, 1);

    assert_eq!(
        repo.update_target_url(999, "https://x.example.com")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_delete() {
    let repo = MemoryShortLinkRepository::new();
    let link = repo
        .create(new_link("AbCd1234", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete(link.id).await.unwrap());
    assert!(!repo.delete(link.id).await.unwrap());
    assert_eq!(repo.find_by_code("AbCd1234").await.unwrap(), None);
    assert_eq!(repo.increment_clicks("AbCd1234").await.unwrap(), None);

    // The code is free again after deletion.
    assert!(
        repo.create(new_link("AbCd1234", "https://example.com"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_increment_unknown_code() {
    let repo = MemoryShortLinkRepository::new();
    assert_eq!(repo.increment_clicks("missing1").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let repo = MemoryShortLinkRepository::new();
    for code in ["aaaaaaaa", "bbbbbbbb", "cccccccc"] {
        repo.create(new_link(code, "https://example.com"))
            .await
            .unwrap();
    }

    let codes: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.short_code)
        .collect();

    assert_eq!(codes, ["cccccccc", "bbbbbbbb", "aaaaaaaa"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_are_all_counted() {
    for n in [1_i64, 10, 100] {
        let repo = Arc::new(MemoryShortLinkRepository::new());
        let service = Arc::new(LinkService::new(repo.clone()));
        let link = service.create("Menu", "https://example.com").await.unwrap();

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let service = Arc::clone(&service);
                let code = link.short_code.clone();
                tokio::spawn(async move { service.resolve_and_count(&code).await })
            })
            .collect();

        for handle in handles {
            let resolved = handle.await.unwrap().unwrap();
            assert_eq!(resolved.target_url, "https://example.com");
        }

        let stored = repo.find_by_code(&link.short_code).await.unwrap().unwrap();
        assert_eq!(stored.click_count, n, "lost increments with {n} concurrent resolutions");
    }
}

#[tokio::test]
async fn test_generated_codes_are_unique() {
    let repo = Arc::new(MemoryShortLinkRepository::new());
    let service = LinkService::new(repo.clone());

    let mut codes = HashSet::new();
    for i in 0..1000 {
        let link = service
            .create(&format!("Link {i}"), "https://example.com")
            .await
            .unwrap();
        assert!(codes.insert(link.short_code));
    }

    assert_eq!(repo.list_all().await.unwrap().len(), 1000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_never_share_a_code() {
    let repo = Arc::new(MemoryShortLinkRepository::new());
    let service = Arc::new(LinkService::new(repo.clone()));

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create(&format!("Link {i}"), "https://example.com")
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap().unwrap();
        assert!(codes.insert(link.short_code));
    }

    assert_eq!(repo.list_all().await.unwrap().len(), 50);
}
