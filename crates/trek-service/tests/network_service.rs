//! Viewer-relative search and friend-location visibility tests

mod support;

use chrono::{Duration, Utc};
use trek_core::entities::Location;
use trek_core::{DomainError, PageRequest};
use trek_service::NetworkService;
use uuid::Uuid;

use support::TestBackend;

fn visited(user: Uuid, name: &str, arrived_days_ago: i64, stay_days: Option<i64>) -> Location {
    let mut location = Location::visited_now(Uuid::new_v4(), user, name.to_string(), 0.0, 0.0);
    location.arrive_at = Utc::now() - Duration::days(arrived_days_ago);
    location.depart_at = stay_days.map(|days| location.arrive_at + Duration::days(days));
    location
}

fn planned(user: Uuid, name: &str, arrive_days: i64, stay_days: Option<i64>) -> Location {
    let arrive_at = Utc::now() + Duration::days(arrive_days);
    Location::planned(
        Uuid::new_v4(),
        user,
        name.to_string(),
        0.0,
        0.0,
        arrive_at,
        stay_days.map(|days| arrive_at + Duration::days(days)),
    )
}

#[tokio::test]
async fn search_matches_username_and_full_name_case_insensitively() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");
    backend.add_named_user("marco", "Marco Polo");
    backend.add_named_user("wanderer", "Polona Kraj");
    backend.add_named_user("unrelated", "Somebody Else");

    let page = NetworkService::new(&ctx)
        .search_users(me.id, "POLO", PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    let names: Vec<&str> = page.items.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["marco", "wanderer"]);
}

#[tokio::test]
async fn search_hides_viewer_and_blocked_pairs() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_named_user("me", "Traveller One");
    let blocked = backend.add_named_user("t_two", "Traveller Two");
    let blocker = backend.add_named_user("t_three", "Traveller Three");
    backend.add_named_user("t_four", "Traveller Four");
    // I blocked one, the other blocked me; neither may surface
    backend.add_blocked(me.id, blocked.id);
    backend.add_blocked(blocker.id, me.id);

    let page = NetworkService::new(&ctx)
        .search_users(me.id, "traveller", PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].username, "t_four");
}

#[tokio::test]
async fn search_rejects_blank_term() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");

    let err = NetworkService::new(&ctx)
        .search_users(me.id, "   ", PageRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_domain(),
        Some(&DomainError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn friends_current_locations_show_only_ongoing_stays() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");
    let friend = backend.add_user("friend");
    let stranger = backend.add_user("stranger");
    backend.add_friends(me.id, friend.id);

    backend.add_location(visited(friend.id, "Lisbon", 2, None));
    backend.add_location(visited(friend.id, "Porto", 30, Some(5)));
    backend.add_location(planned(friend.id, "Madrid", 10, Some(3)));
    backend.add_location(visited(stranger.id, "Oslo", 1, None));

    let page = NetworkService::new(&ctx)
        .friends_current_locations(me.id, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].name, "Lisbon");
}

#[tokio::test]
async fn no_friends_means_an_empty_page() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");

    let page = NetworkService::new(&ctx)
        .friends_current_locations(me.id, PageRequest::default())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn friend_visited_locations_require_a_standing_friendship() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");
    let pending = backend.add_user("pending");
    let stranger = backend.add_user("stranger");
    backend.add_pending(me.id, pending.id);
    backend.add_location(visited(pending.id, "Rome", 5, Some(2)));

    let service = NetworkService::new(&ctx);

    // A pending edge and no edge at all fail identically
    let not_yet = service
        .friend_visited_locations(me.id, pending.id, PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(not_yet.as_domain(), Some(&DomainError::RelationNotFriend));

    let none = service
        .friend_visited_locations(me.id, stranger.id, PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(none.as_domain(), Some(&DomainError::RelationNotFriend));

    let own = service
        .friend_visited_locations(me.id, me.id, PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(own.as_domain(), Some(&DomainError::SelfRelation));
}

#[tokio::test]
async fn friend_visited_locations_are_most_recent_first() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");
    let friend = backend.add_user("friend");
    backend.add_friends(me.id, friend.id);

    backend.add_location(visited(friend.id, "Porto", 30, Some(5)));
    backend.add_location(visited(friend.id, "Lisbon", 2, None));
    backend.add_location(planned(friend.id, "Madrid", 10, Some(3)));

    let page = NetworkService::new(&ctx)
        .friend_visited_locations(me.id, friend.id, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    let names: Vec<&str> = page.items.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Lisbon", "Porto"]);
}

#[tokio::test]
async fn friend_planned_locations_skip_lapsed_plans() {
    let backend = TestBackend::new();
    let ctx = backend.context();
    let me = backend.add_user("me");
    let friend = backend.add_user("friend");
    backend.add_friends(me.id, friend.id);

    // A plan whose departure already passed
    let mut lapsed = planned(friend.id, "Vienna", 1, Some(1));
    lapsed.arrive_at = Utc::now() - Duration::days(10);
    lapsed.depart_at = Some(Utc::now() - Duration::days(8));
    backend.add_location(lapsed);

    backend.add_location(planned(friend.id, "Kyoto", 20, Some(7)));
    backend.add_location(planned(friend.id, "Seoul", 5, None));

    let page = NetworkService::new(&ctx)
        .friend_planned_locations(me.id, friend.id, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    let names: Vec<&str> = page.items.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Seoul", "Kyoto"]);
}
