//! Connection admission tests

mod common;

use common::Harness;

#[test]
fn test_first_client_is_admitted_with_banner() {
    let mut h = Harness::plain();
    let conn = h.transport.connect("10.0.0.5");
    assert!(!h.session.is_connected());

    h.session.service();

    assert!(h.session.is_connected());
    assert!(!conn.is_closed());
    assert!(conn.0.borrow().no_delay);
    let banner = conn.output();
    assert!(banner.contains("* Hostname: test-device\r\n"));
    assert!(banner.contains("* IP: 192.168.4.1\r\n"));
    assert!(banner.contains("* Free heap RAM: 40960\r\n"));
    assert!(banner.ends_with("***\r\n"));
}

#[test]
fn test_same_address_replaces_client() {
    let mut h = Harness::plain();
    let old = h.attach("10.0.0.5");

    let new = h.transport.connect("10.0.0.5");
    h.session.service();

    assert!(old.is_closed());
    assert!(!new.is_closed());
    assert!(h.session.is_connected());
    assert!(new.output().contains("* Commands:"));

    h.command(&new, "m");
    assert!(new.output().contains("* Free heap RAM: 40960"));
}

#[test]
fn test_other_address_is_rejected() {
    let mut h = Harness::plain();
    let old = h.attach("10.0.0.5");

    let intruder = h.transport.connect("10.0.0.9");
    h.session.service();

    assert!(intruder.is_closed());
    assert!(intruder.output().is_empty());
    assert!(!old.is_closed());
    assert!(old.output().is_empty());
    assert!(h.session.is_connected());

    h.command(&old, "m");
    assert!(old.output().contains("* Free heap RAM"));
}

#[test]
fn test_new_address_admitted_after_old_client_left() {
    let mut h = Harness::plain();
    let old = h.attach("10.0.0.5");
    old.hang_up();
    h.session.service();
    assert!(!h.session.is_connected());

    let new = h.transport.connect("10.0.0.9");
    h.session.service();
    assert!(h.session.is_connected());
    assert!(!new.is_closed());
}

#[test]
fn test_input_before_and_during_settle_is_discarded() {
    let mut h = Harness::plain();
    let conn = h.transport.connect("10.0.0.5");
    conn.send(b"q\r\n");

    h.session.service();

    assert!(h.session.is_connected());
    assert!(!conn.is_closed());
    assert_eq!(h.session.last_command(), "");
    assert!(!conn.output().contains("Command received"));
}

#[test]
fn test_settle_delay_uses_clock() {
    let mut h = Harness::plain();
    let start = h.clock.now();
    h.attach("10.0.0.5");
    assert_eq!(h.clock.now(), start + h.session.config().settle_ms);
}

#[test]
fn test_reconnect_resets_last_command() {
    let mut h = Harness::plain();
    let conn = h.attach("10.0.0.5");
    h.command(&conn, "t");
    assert_eq!(h.session.last_command(), "t");

    h.transport.connect("10.0.0.5");
    h.session.service();
    assert_eq!(h.session.last_command(), "");
}

#[test]
fn test_settings_survive_reconnect() {
    let mut h = Harness::plain();
    let conn = h.attach("10.0.0.5");
    h.command(&conn, "w");
    h.command(&conn, "filter boot");
    h.command(&conn, "q");
    assert!(!h.session.is_connected());

    h.attach("10.0.0.7");
    assert_eq!(h.session.state().client_level(), rust_remote_debug::Level::Warning);
    assert_eq!(h.session.state().filter(), Some("boot"));
}

#[test]
fn test_stop_closes_client_and_transport() {
    let mut h = Harness::plain();
    let conn = h.attach("10.0.0.5");
    h.session.stop();

    assert!(conn.is_closed());
    assert!(h.transport.is_stopped());
    assert!(!h.session.is_connected());

    h.transport.connect("10.0.0.5");
    h.session.service();
    assert!(!h.session.is_connected());
}
