use std::io::Cursor;
use xtrace_stats::aggregator::{analyze_reader, OrphanPolicy, TraceAnalyzer};

fn analyze(input: &str) -> xtrace_stats::aggregator::Analysis {
    analyze_reader(Cursor::new(input), OrphanPolicy::Discard).unwrap()
}

#[test]
fn test_end_to_end_nesting() {
    let analysis = analyze(
        "10:00:00:000 0x1 > foo()V\n\
         10:00:00:050 0x1 > bar()V\n\
         10:00:00:080 0x1 < bar()V\n\
         10:00:00:120 0x1 < foo()V\n",
    );

    let bar = analysis.table.get("bar()V").unwrap();
    assert_eq!(bar.count, 1);
    assert_eq!(bar.total_duration_ms, 30);

    let foo = analysis.table.get("foo()V").unwrap();
    assert_eq!(foo.count, 1);
    assert_eq!(foo.total_duration_ms, 120);
}

#[test]
fn test_interleaved_threads() {
    let analysis = analyze(
        "10:00:00:000 0x1 mt.3 > work()V\n\
         10:00:00:010 0x2 mt.3 > work()V\n\
         10:00:00:015 0x2 mt.9 < work()V\n\
         10:00:00:100 0x1 mt.9 < work()V\n",
    );

    let work = analysis.table.get("work()V").unwrap();
    assert_eq!(work.count, 2);
    assert_eq!(work.total_duration_ms, 5 + 100);
    assert_eq!(analysis.summary.threads, 2);
}

#[test]
fn test_well_nested_total_is_exact() {
    // (entry, exit) pairs per thread, well nested
    let analysis = analyze(
        "09:00:00:000 0x1 > a()V\n\
         09:00:00:003 0x1 > b()V\n\
         09:00:00:004 0x2 > c()V\n\
         09:00:00:009 0x1 < b()V\n\
         09:00:00:010 0x1 > b()V\n\
         09:00:00:017 0x2 < c()V\n\
         09:00:00:020 0x1 < b()V\n\
         09:00:00:033 0x1 < a()V\n",
    );

    let expected = (33 - 0) + (9 - 3) + (20 - 10) + (17 - 4);
    assert_eq!(analysis.table.total_duration_ms(), expected);
    assert_eq!(analysis.table.total_calls(), 4);
    assert_eq!(analysis.table.get("b()V").unwrap().count, 2);
}

#[test]
fn test_mismatched_exit_drops_inner_entry() {
    let analysis = analyze(
        "10:00:00:000 0x1 > A()V\n\
         10:00:00:010 0x1 > B()V\n\
         10:00:00:050 0x1 < A()V\n",
    );

    assert_eq!(analysis.table.get("A()V").unwrap().total_duration_ms, 50);
    assert!(analysis.table.get("B()V").is_none());
    assert_eq!(analysis.summary.orphaned_frames, 1);
    assert_eq!(analysis.summary.unterminated_frames, 0);
}

#[test]
fn test_retain_policy_keeps_inner_entry_open() {
    let input = "10:00:00:000 0x1 > A()V\n\
                 10:00:00:010 0x1 > B()V\n\
                 10:00:00:050 0x1 < A()V\n\
                 10:00:00:070 0x1 < B()V\n";
    let analysis = analyze_reader(Cursor::new(input), OrphanPolicy::Retain).unwrap();

    assert_eq!(analysis.table.get("A()V").unwrap().total_duration_ms, 50);
    assert_eq!(analysis.table.get("B()V").unwrap().total_duration_ms, 60);
    assert_eq!(analysis.summary.orphaned_frames, 0);
}

#[test]
fn test_unmatched_exit_has_no_effect_on_other_threads() {
    let analysis = analyze(
        "10:00:00:000 0x2 > keep()V\n\
         10:00:00:005 0x1 < X()V\n\
         10:00:00:020 0x2 < keep()V\n",
    );

    assert!(analysis.table.get("X()V").is_none());
    assert_eq!(analysis.table.get("keep()V").unwrap().total_duration_ms, 20);
    assert_eq!(analysis.summary.unmatched_exits, 1);
}

#[test]
fn test_rollover_across_midnight() {
    let analysis = analyze(
        "23:59:59:900 0x1 > nightly()V\n\
         00:00:00:100 0x1 < nightly()V\n",
    );

    let nightly = analysis.table.get("nightly()V").unwrap();
    assert_eq!(nightly.count, 1);
    assert_eq!(nightly.total_duration_ms, 200);
    assert_eq!(analysis.summary.rollovers, 1);
}

#[test]
fn test_unterminated_frames_are_dropped() {
    let analysis = analyze(
        "10:00:00:000 0x1 > main()V\n\
         10:00:00:001 0x1 > step()V\n\
         10:00:00:002 0x1 < step()V\n",
    );

    assert!(analysis.table.get("main()V").is_none());
    assert_eq!(analysis.summary.unterminated_frames, 1);
}

#[test]
fn test_noise_lines_are_ignored() {
    let analysis = analyze(
        "\n\
         JVMDUMP032I JVM requested Java dump\n\
         10:00:00:000 0x1 > foo()V\n\
         10:00:00:001 0x1 j9vm.1 - some other tracepoint\n\
         10:00:00:004 0x1 < foo()V\n",
    );

    assert_eq!(analysis.summary.lines_read, 5);
    assert_eq!(analysis.summary.events_parsed, 2);
    assert_eq!(analysis.table.get("foo()V").unwrap().total_duration_ms, 4);
}

#[test]
fn test_count_matches_matched_exits() {
    let mut analyzer = TraceAnalyzer::new(OrphanPolicy::Discard);
    for line in [
        "10:00:00:000 0x1 > f()V",
        "10:00:00:001 0x1 < f()V",
        "10:00:00:002 0x1 < f()V", // nothing open
        "10:00:00:003 0x1 > f()V",
        "10:00:00:004 0x1 > g()V",
        "10:00:00:005 0x1 < f()V", // closes f, orphans g
        "10:00:00:006 0x1 < g()V", // g already dropped
    ] {
        analyzer.feed_line(line);
    }
    let analysis = analyzer.finish();

    assert_eq!(analysis.table.get("f()V").unwrap().count, 2);
    assert!(analysis.table.get("g()V").is_none());
    assert_eq!(analysis.summary.completed_calls, 2);
    assert_eq!(analysis.summary.unmatched_exits, 2);
    assert_eq!(analysis.summary.orphaned_frames, 1);
}
