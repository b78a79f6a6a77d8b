use super::*;

async fn next(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    rx.recv().await.expect("a line for the session")
}

#[tokio::test]
async fn test_show_rooms_when_empty() {
    let hub = Hub::new();
    let (mut session, mut rx) = hub.connect().await;

    session.handle_line("show_rooms\n").await;
    assert_eq!(next(&mut rx).await, "rooms");
}

#[tokio::test]
async fn test_two_players_meet_and_exchange_moves() {
    let hub = Hub::new();
    let (mut white, mut white_rx) = hub.connect().await;
    let (mut black, mut black_rx) = hub.connect().await;

    white.handle_line("create_room#&#alpha").await;
    assert_eq!(next(&mut white_rx).await, "joined#&#alpha#&#White");

    black.handle_line("show_rooms").await;
    assert_eq!(next(&mut black_rx).await, "rooms#&#alpha:1");

    black.handle_line("connect_room#&#alpha").await;
    assert_eq!(next(&mut black_rx).await, "joined#&#alpha#&#Black");
    assert_eq!(next(&mut black_rx).await, "start#&#alpha");
    assert_eq!(next(&mut white_rx).await, "start#&#alpha");

    white.handle_line("make_move#&#6e:4e:White").await;
    assert_eq!(next(&mut black_rx).await, "make_move#&#6e:4e:White");

    black.handle_line("make_move#&#6d:4d:Black\r\n").await;
    assert_eq!(next(&mut white_rx).await, "make_move#&#6d:4d:Black");

    assert!(white_rx.try_recv().is_err());
    assert!(black_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_third_player_is_turned_away() {
    let hub = Hub::new();
    let (mut a, _a_rx) = hub.connect().await;
    let (mut b, _b_rx) = hub.connect().await;
    let (mut c, mut c_rx) = hub.connect().await;

    a.handle_line("create_room#&#alpha").await;
    b.handle_line("connect_room#&#alpha").await;
    c.handle_line("connect_room#&#alpha").await;

    assert_eq!(
        next(&mut c_rx).await,
        "error#&#room_full#&#room 'alpha' is full"
    );
    assert_eq!(c.room(), None);
}

#[tokio::test]
async fn test_duplicate_room_name() {
    let hub = Hub::new();
    let (mut a, _a_rx) = hub.connect().await;
    let (mut b, mut b_rx) = hub.connect().await;

    a.handle_line("create_room#&#alpha").await;
    b.handle_line("create_room#&#alpha").await;

    assert_eq!(
        next(&mut b_rx).await,
        "error#&#room_exists#&#room 'alpha' already exists"
    );
}

#[tokio::test]
async fn test_malformed_input_keeps_session_alive() {
    let hub = Hub::new();
    let (mut session, mut rx) = hub.connect().await;

    session.handle_line("hello").await;
    assert!(next(&mut rx).await.starts_with("error#&#bad_command#&#"));

    session.handle_line("make_move#&#9z:4e:White").await;
    assert!(next(&mut rx).await.starts_with("error#&#bad_move#&#"));

    session.handle_line("make_move#&#6e:4e:White").await;
    assert_eq!(next(&mut rx).await, "error#&#not_in_room#&#not in a room");

    session.handle_line("show_rooms").await;
    assert_eq!(next(&mut rx).await, "rooms");
}

#[tokio::test]
async fn test_move_rules_inside_a_room() {
    let hub = Hub::new();
    let (mut white, mut white_rx) = hub.connect().await;

    white.handle_line("create_room#&#alpha").await;
    next(&mut white_rx).await;

    white.handle_line("make_move#&#6e:4e:White").await;
    assert_eq!(
        next(&mut white_rx).await,
        "error#&#no_opponent#&#no opponent in the room yet"
    );

    white.handle_line("make_move#&#1e:3e:Black").await;
    assert_eq!(
        next(&mut white_rx).await,
        "error#&#wrong_player#&#you are playing White"
    );

    white.handle_line("create_room#&#beta").await;
    assert_eq!(
        next(&mut white_rx).await,
        "error#&#already_in_room#&#already in room 'alpha'"
    );
}

#[tokio::test]
async fn test_exit_notifies_opponent_and_frees_seat() {
    let hub = Hub::new();
    let (mut white, mut white_rx) = hub.connect().await;
    let (mut black, mut black_rx) = hub.connect().await;

    white.handle_line("create_room#&#alpha").await;
    black.handle_line("connect_room#&#alpha").await;
    next(&mut white_rx).await; // joined
    next(&mut white_rx).await; // start
    next(&mut black_rx).await; // joined
    next(&mut black_rx).await; // start

    black.handle_line("exit").await;
    assert_eq!(next(&mut black_rx).await, "left#&#alpha");
    assert_eq!(next(&mut white_rx).await, "opponent_left#&#alpha");
    assert_eq!(black.room(), None);

    black.handle_line("exit").await;
    assert_eq!(next(&mut black_rx).await, "error#&#not_in_room#&#not in a room");

    black.handle_line("show_rooms").await;
    assert_eq!(next(&mut black_rx).await, "rooms#&#alpha:1");
}

#[tokio::test]
async fn test_disconnect_cleans_up() {
    let hub = Hub::new();
    let (mut white, mut white_rx) = hub.connect().await;
    let (mut black, _black_rx) = hub.connect().await;

    white.handle_line("create_room#&#alpha").await;
    black.handle_line("connect_room#&#alpha").await;
    next(&mut white_rx).await;
    next(&mut white_rx).await;
    assert_eq!(hub.session_count().await, 2);

    black.disconnect().await;
    assert_eq!(next(&mut white_rx).await, "opponent_left#&#alpha");
    assert_eq!(hub.session_count().await, 1);

    white.disconnect().await;
    assert_eq!(hub.session_count().await, 0);
    assert!(hub.rooms().is_empty().await);
}

#[tokio::test]
async fn test_nicknamed_room_commands_are_accepted() {
    let hub = Hub::new();
    let (mut white, mut white_rx) = hub.connect().await;
    let (mut black, mut black_rx) = hub.connect().await;

    white.handle_line("create_room#&#alpha#&#alice").await;
    assert_eq!(next(&mut white_rx).await, "joined#&#alpha#&#White");

    black.handle_line("connect_room#&#alpha#&#bob").await;
    assert_eq!(next(&mut black_rx).await, "joined#&#alpha#&#Black");
    assert_eq!(black.room(), Some("alpha"));
}
