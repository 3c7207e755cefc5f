//! Tests for stylesheet name resolution and the join barrier.

#![allow(unused_results)]

use livesheet_editor::NameResolver;
use livesheet_editor::barrier::{Arrival, JoinBarrier};
use livesheet_editor::naming::{MAX_NAME_LEN, NameCandidate};

// ========== names ==========

#[test]
fn test_url_drops_scheme_and_host() {
    let mut names = NameResolver::new();
    assert_eq!(
        names.resolve(NameCandidate::Url("https://cdn.test/css/site.css?v=2")),
        "/css/site.css?v=2"
    );
}

#[test]
fn test_title_and_anonymous() {
    let mut names = NameResolver::new();
    assert_eq!(names.resolve(NameCandidate::Title("theme")), "theme");
    assert_eq!(names.resolve(NameCandidate::Anonymous), "style[0]");
    assert_eq!(names.resolve(NameCandidate::Title("")), "style[1]");
}

#[test]
fn test_duplicates_fall_back_to_synthetic() {
    let mut names = NameResolver::new();
    assert_eq!(names.resolve(NameCandidate::Url("http://a.test/x.css")), "/x.css");
    assert_eq!(names.resolve(NameCandidate::Url("http://b.test/x.css")), "style[0]");
    assert_eq!(names.resolve(NameCandidate::Title("/x.css")), "style[1]");
    assert_eq!(names.len(), 3);
}

#[test]
fn test_long_names_truncate_before_uniqueness_check() {
    let long_a = format!("{}-a.css", "x".repeat(60));
    let long_b = format!("{}-b.css", "x".repeat(60));
    let mut names = NameResolver::new();

    let first = names.resolve(NameCandidate::Title(&long_a));
    let second = names.resolve(NameCandidate::Title(&long_b));

    assert_eq!(first.chars().count(), MAX_NAME_LEN);
    assert_eq!(second, "style[0]");
}

#[test]
fn test_truncation_counts_characters() {
    let title = "é".repeat(50);
    let mut names = NameResolver::new();
    assert_eq!(names.resolve(NameCandidate::Title(&title)), "é".repeat(40));
}

#[test]
fn test_synthetic_skips_taken_names() {
    let mut names = NameResolver::new();
    let _ = names.resolve(NameCandidate::Title("style[0]"));

    assert_eq!(names.resolve(NameCandidate::Anonymous), "style[1]");
    assert_eq!(names.next_synthetic(), (2, "style[2]".to_string()));
    assert!(names.contains("style[0]"));
}

// ========== barrier ==========

#[test]
fn test_barrier_completes_once() {
    let mut barrier = JoinBarrier::new(3);

    assert_eq!(barrier.arrive(), Arrival::Waiting(2));
    assert_eq!(barrier.arrive(), Arrival::Waiting(1));
    assert!(!barrier.is_complete());
    assert_eq!(barrier.arrive(), Arrival::Complete);
    assert!(barrier.is_complete());
    assert_eq!(barrier.arrive(), Arrival::AlreadyComplete);
    assert_eq!(barrier.remaining(), 0);
}

#[test]
fn test_barrier_of_one() {
    let mut barrier = JoinBarrier::new(1);
    assert_eq!(barrier.arrive(), Arrival::Complete);
}
