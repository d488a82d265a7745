use snaplink::domain::entities::NewMapping;
use snaplink::domain::repositories::MappingRepository;
use snaplink::infrastructure::persistence::MemoryMappingRepository;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    let repo = MemoryMappingRepository::new();
    repo.create(NewMapping::new("hot1", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..200)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("hot1").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.find_by_code("hot1").await.unwrap().clicks, 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_code_have_one_winner() {
    let repo = MemoryMappingRepository::new();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create(NewMapping::new("promo1", format!("https://example.com/{i}")))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) if e.is_duplicate_code() => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 49);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_find_by_long_url_returns_earliest() {
    let repo = MemoryMappingRepository::new();

    let first = repo
        .create(NewMapping::new("zzzz", "https://a.com"))
        .await
        .unwrap();
    repo.create(NewMapping::new("aaaa", "https://a.com"))
        .await
        .unwrap();

    for _ in 0..5 {
        let found = repo.find_by_long_url("https://a.com").await.unwrap();
        assert_eq!(found.code, first.code);
    }
}

#[tokio::test]
async fn test_find_by_long_url_is_exact() {
    let repo = MemoryMappingRepository::new();
    repo.create(NewMapping::new("aaaa", "https://a.com"))
        .await
        .unwrap();

    assert!(
        repo.find_by_long_url("https://a.com/")
            .await
            .unwrap_err()
            .is_not_found()
    );
}
