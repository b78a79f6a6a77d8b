use super::*;

#[tokio::test]
async fn test_create_seats_creator_as_white() {
    let rooms = RoomRegistry::new();
    assert_eq!(rooms.create("alpha", 1).await, Ok(Player::White));
    assert_eq!(
        rooms.seating("alpha", 1).await,
        Some(Seating {
            seat: Player::White,
            opponent: None
        })
    );
}

#[tokio::test]
async fn test_duplicate_room_is_rejected() {
    let rooms = RoomRegistry::new();
    rooms.create("alpha", 1).await.unwrap();
    assert_eq!(
        rooms.create("alpha", 2).await,
        Err(RelayError::RoomExists("alpha".to_string()))
    );
    assert_eq!(rooms.len().await, 1);
}

#[tokio::test]
async fn test_join_fills_black_then_rejects() {
    let rooms = RoomRegistry::new();
    rooms.create("alpha", 1).await.unwrap();

    let seating = rooms.join("alpha", 2).await.unwrap();
    assert_eq!(seating.seat, Player::Black);
    assert_eq!(seating.opponent, Some(1));

    assert_eq!(
        rooms.join("alpha", 3).await,
        Err(RelayError::RoomFull("alpha".to_string()))
    );
    assert_eq!(
        rooms.join("beta", 3).await,
        Err(RelayError::RoomNotFound("beta".to_string()))
    );
}

#[tokio::test]
async fn test_leave_frees_seat_and_closes_empty_room() {
    let rooms = RoomRegistry::new();
    rooms.create("alpha", 1).await.unwrap();
    rooms.join("alpha", 2).await.unwrap();

    assert_eq!(rooms.leave("alpha", 1).await, Some(2));
    // White's seat is free again
    let seating = rooms.join("alpha", 3).await.unwrap();
    assert_eq!(seating.seat, Player::White);
    assert_eq!(seating.opponent, Some(2));

    assert_eq!(rooms.leave("alpha", 2).await, Some(3));
    assert_eq!(rooms.leave("alpha", 3).await, None);
    assert!(rooms.is_empty().await);
    assert_eq!(rooms.leave("alpha", 3).await, None);
}

#[tokio::test]
async fn test_summaries_sorted_with_counts() {
    let rooms = RoomRegistry::new();
    rooms.create("beta", 1).await.unwrap();
    rooms.create("alpha", 2).await.unwrap();
    rooms.join("beta", 3).await.unwrap();

    let summaries = rooms.summaries().await;
    assert_eq!(
        summaries,
        vec![
            RoomSummary {
                name: "alpha".into(),
                players: 1
            },
            RoomSummary {
                name: "beta".into(),
                players: 2
            },
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_have_one_winner() {
    let rooms = Arc::new(RoomRegistry::new());
    let mut handles = Vec::new();
    for session in 0..16 {
        let rooms = Arc::clone(&rooms);
        handles.push(tokio::spawn(async move {
            rooms.create("contested", session).await.is_ok()
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_fill_exactly_one_seat() {
    let rooms = Arc::new(RoomRegistry::new());
    rooms.create("contested", 0).await.unwrap();

    let mut handles = Vec::new();
    for session in 1..=16 {
        let rooms = Arc::clone(&rooms);
        handles.push(tokio::spawn(async move {
            rooms.join("contested", session).await
        }));
    }

    let mut seated = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(seating) => {
                assert_eq!(seating.seat, Player::Black);
                seated += 1;
            }
            Err(e) => assert_eq!(e.code(), "room_full"),
        }
    }
    assert_eq!(seated, 1);
    assert_eq!(rooms.summaries().await[0].players, 2);
}
