//! End-to-end tournament: host session and a guest view exchanging JSON.

use proptest::prelude::*;
use slaps_core::{Player, SlotId};
use slaps_lobby::{
    LobbyConfig, LobbyView, MemoryRatingStore, Message, Outbox, Phase, RatingStore,
    TournamentSession,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn player(i: usize) -> Player {
    Player::new(format!("Player {}", i), format!("peer-{}", i))
}

/// Serialize every outgoing message and feed it to the guest, as a peer would
fn relay(outbox: &mut Outbox, guest: &mut LobbyView) {
    for message in outbox.drain() {
        let json = message.to_json().unwrap();
        guest.apply(&Message::from_json(&json).unwrap()).unwrap();
    }
}

fn play_out(n: usize, seed: [u8; 32]) -> (TournamentSession, LobbyView, MemoryRatingStore) {
    let mut host = TournamentSession::open(player(1), LobbyConfig::default(), &seed, |_| false).unwrap();
    let mut guest = LobbyView::new();
    let mut outbox = Outbox::new();
    let mut store = MemoryRatingStore::new();

    for i in 2..=n {
        let join = Message::JoinRequest { player: player(i) }.to_json().unwrap();
        host.handle_message(Message::from_json(&join).unwrap(), &mut outbox).unwrap();
    }
    host.start(&mut outbox).unwrap();
    relay(&mut outbox, &mut guest);

    while let Some((first, second)) = host.pending_matches().first().copied() {
        // alternate which seat wins to exercise both sides of each match
        let winner = if host.pending_matches().len() % 2 == 0 { first } else { second };
        host.report_rated_winner(winner, &mut outbox, &mut store).unwrap();
        relay(&mut outbox, &mut guest);
    }

    (host, guest, store)
}

#[test]
fn eight_player_tournament_end_to_end() {
    init_logging();
    let (host, guest, store) = play_out(8, [5u8; 32]);

    assert_eq!(host.phase(), Phase::Finished);
    assert_eq!(guest.players().len(), 8);
    assert_eq!(guest.code(), Some(host.code()));

    let champion = host.champion().unwrap();
    assert_eq!(guest.champion(), Some(champion));
    assert_eq!(guest.bracket(), host.bracket());

    // champion won three matches, everyone else lost exactly once
    let record = store.record(&champion.id).unwrap();
    assert_eq!(record.games_played, 3);
    assert!(record.rating > 1000);
    assert_eq!(store.leaderboard()[0].0, champion.id);
}

#[test]
fn guest_rejects_join_requests() {
    init_logging();
    let mut guest = LobbyView::new();
    assert!(guest
        .apply(&Message::JoinRequest { player: player(9) })
        .is_err());
}

#[test]
fn too_many_players_refused_before_seeding() {
    init_logging();
    let config = LobbyConfig::from_json(r#"{"maxPlayers": 4}"#).unwrap();
    let mut host = TournamentSession::open(player(1), config, &[1u8; 32], |_| false).unwrap();
    let mut outbox = Outbox::new();
    for i in 2..=4 {
        host.join(player(i), &mut outbox).unwrap();
    }
    assert!(host.join(player(5), &mut outbox).is_err());
    host.start(&mut outbox).unwrap();
    assert_eq!(host.bracket().unwrap().assignments().len(), 4);
    assert!(host
        .bracket()
        .unwrap()
        .assignments()
        .iter()
        .all(|(slot, _)| *slot != SlotId::Champion));
}

#[test]
fn shared_name_refused_so_guest_bracket_matches_host() {
    init_logging();
    let mut host = TournamentSession::open(
        Player::new("Sam", "peer-a"),
        LobbyConfig::from_json(r#"{"shuffleSeeding": false}"#).unwrap(),
        &[3u8; 32],
        |_| false,
    )
    .unwrap();
    let mut guest = LobbyView::new();
    let mut outbox = Outbox::new();

    let twin = Message::JoinRequest { player: Player::new("Sam", "peer-b") };
    assert!(host.handle_message(twin, &mut outbox).is_err());
    host.join(Player::new("Sam B", "peer-b"), &mut outbox).unwrap();
    host.join(player(3), &mut outbox).unwrap();
    host.start(&mut outbox).unwrap();
    relay(&mut outbox, &mut guest);

    assert_eq!(guest.players().len(), 3);
    assert_eq!(guest.bracket(), host.bracket());
    let ids: Vec<String> = guest.bracket().unwrap().assignments().into_iter().map(|(_, p)| p.id).collect();
    assert!(ids.iter().any(|id| id == "peer-a"));
    assert!(ids.iter().any(|id| id == "peer-b"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_size_produces_one_champion(n in 2usize..=16, seed in any::<[u8; 32]>()) {
        let (host, guest, store) = play_out(n, seed);
        prop_assert_eq!(host.phase(), Phase::Finished);
        prop_assert!(host.champion().is_some());
        prop_assert_eq!(guest.champion(), host.champion());

        // n - 1 matches played, two rating records touched per match
        let games: u32 = store.leaderboard().iter().map(|(_, r)| r.games_played).sum();
        prop_assert_eq!(games as usize, 2 * (n - 1));
    }
}
