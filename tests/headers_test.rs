use birdnet::emulation::BrowserProfile;
use birdnet::http::{NetworkTransport, OrderedHeaderMap, RequestSpec};
use birdnet::session::{ActionExecutor, Session};
use birdnet::Credential;

fn ready_session() -> Session {
    let mut session = Session::new(Credential::raw("X"), None);
    session.bootstrap().unwrap();
    session
}

#[test]
fn test_ordered_headers_insertion_order() {
    let mut map = OrderedHeaderMap::new();

    map.insert("Host", "x.com").unwrap();
    map.insert("Accept", "*/*").unwrap();
    map.insert("Authorization", "Bearer t").unwrap();
    map.insert("User-Agent", "birdnet").unwrap();

    let header_map = map.to_header_map();
    let names: Vec<_> = header_map.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, ["host", "accept", "authorization", "user-agent"]);
}

#[test]
fn test_ordered_headers_update_preserves_order() {
    let mut map = OrderedHeaderMap::new();

    map.insert("A", "1").unwrap();
    map.insert("B", "2").unwrap();
    map.insert("C", "3").unwrap();
    map.insert("B", "22").unwrap();

    assert_eq!(map.names(), ["a", "b", "c"]);
    assert_eq!(map.get_str("b"), Some("22"));
}

#[test]
fn test_action_headers_layer_over_baseline() {
    let session = ready_session();
    let executor = ActionExecutor::new(NetworkTransport::new(), BrowserProfile::default());

    let spec = RequestSpec::post("https://x.com/i/api/graphql/q/FavoriteTweet")
        .unwrap()
        .header("accept", "application/json")
        .header("authorization", "Bearer t")
        .cookie_slot()
        .csrf_slot();

    let headers = executor.assemble(&session, &spec).unwrap();
    let names = headers.names();

    // baseline position kept, value replaced
    assert_eq!(names[0], "accept");
    assert_eq!(headers.get_str("accept"), Some("application/json"));

    let ua = names.iter().position(|n| *n == "user-agent").unwrap();
    let auth = names.iter().position(|n| *n == "authorization").unwrap();
    let cookie = names.iter().position(|n| *n == "cookie").unwrap();
    let csrf = names.iter().position(|n| *n == "x-csrf-token").unwrap();
    assert!(ua < auth && auth < cookie && cookie < csrf);

    assert_eq!(headers.get_str("x-csrf-token"), Some(session.security_token()));
    assert_eq!(headers.get_str("cookie"), Some(session.cookie_header().as_str()));
}

#[test]
fn test_session_headers_appended_when_not_placed() {
    let session = ready_session();
    let executor = ActionExecutor::new(NetworkTransport::new(), BrowserProfile::chrome_mac());

    let spec = RequestSpec::get("https://api.x.com/1.1/account/multi/list.json").unwrap();
    let headers = executor.assemble(&session, &spec).unwrap();
    let names = headers.names();

    assert_eq!(names[names.len() - 2], "cookie");
    assert_eq!(names[names.len() - 1], "x-csrf-token");
    assert_eq!(headers.get_str("sec-ch-ua-platform"), Some("\"macOS\""));
}

#[test]
fn test_slot_values_follow_rotation() {
    let mut session = ready_session();
    let executor = ActionExecutor::new(NetworkTransport::new(), BrowserProfile::default());
    let spec = RequestSpec::get("https://x.com/").unwrap().csrf_slot();

    session.absorb(&["ct0=rotated; Path=/".to_string()]);
    let headers = executor.assemble(&session, &spec).unwrap();

    assert_eq!(headers.get_str("x-csrf-token"), Some("rotated"));
    assert!(headers.get_str("cookie").unwrap().ends_with("ct0=rotated"));
}
