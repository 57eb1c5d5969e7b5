//! Contract Invariant Tests
//!
//! These tests verify the guarantees every avatar description must keep.

use ravatar_core::{
    AvatarDescription, AvatarPipeline, GradientSet, RenderConfig, RowKind,
    generate, compute_fingerprint,
};
use std::collections::HashSet;

fn corpus(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("user-{}@example.com", i)).collect()
}

#[test]
fn invariant_generation_is_deterministic() {
    for seed in corpus(200) {
        assert_eq!(generate(&seed), generate(&seed));
    }
}

#[test]
fn invariant_lengths_and_coverage() {
    for seed in corpus(2_000).iter().map(String::as_str).chain(["", " ", "\u{0}", "🦀🦀🦀"]) {
        let d = generate(seed);
        assert_eq!(d.rows().len(), 3);
        let expected: usize = d.rows().iter().map(|r| r.node_count()).sum();
        assert_eq!(d.colored_nodes().len(), expected, "length for {seed:?}");
        assert!(d.colored_nodes().contains(&true), "coverage for {seed:?}");
    }
}

#[test]
fn invariant_case_sensitive() {
    assert_ne!(generate("alice"), generate("Alice"));
}

#[test]
fn invariant_long_seed() {
    let seed = "x".repeat(1000);
    let d = generate(&seed);
    assert!(d.is_vertical());
    assert_eq!(d.rows(), &[RowKind::SpaceLine, RowKind::SpaceLine, RowKind::Line]);
    assert_eq!(d.gradient_set(), GradientSet::LightBlue);
    assert_eq!(d.colored_nodes(), &[true, false, false]);
}

#[test]
fn invariant_empty_seed_golden() {
    let d = generate("");
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(
        json,
        r#"{"isVertical":true,"rows":["LINE","DOT_DOT_SPACE","LINE"],"gradientSet":"light_blue","coloredNodes":[false,true,false,false]}"#
    );
}

#[test]
fn invariant_seeds_spread() {
    let distinct: HashSet<_> = corpus(100)
        .iter()
        .map(|s| compute_fingerprint(&generate(s)).unwrap())
        .collect();
    assert!(distinct.len() > 90, "only {} distinct descriptions", distinct.len());
}

#[test]
fn invariant_distribution_sanity() {
    let n = 20_000;
    let mut vertical = 0usize;
    let mut row_counts = [0usize; 9];
    let mut gradient_counts = [0usize; 6];
    let mut colored = 0usize;
    let mut nodes = 0usize;

    for seed in corpus(n) {
        let d = generate(&seed);
        vertical += usize::from(d.is_vertical());
        for row in d.rows() {
            let index = RowKind::ALL.iter().position(|k| k == row).unwrap();
            row_counts[index] += 1;
        }
        let index = GradientSet::ALL.iter().position(|g| *g == d.gradient_set()).unwrap();
        gradient_counts[index] += 1;

        let count = d.colored_nodes().iter().filter(|&&c| c).count();
        // Single-colored descriptions may come from the forced path; skip them.
        if count > 1 {
            colored += count;
            nodes += d.total_nodes();
        }
    }

    let vertical_rate = vertical as f64 / n as f64;
    assert!((vertical_rate - 0.5).abs() < 0.02, "vertical rate {vertical_rate}");

    let row_expected = (3 * n) as f64 / 9.0;
    for (i, &count) in row_counts.iter().enumerate() {
        assert!((count as f64 - row_expected).abs() < row_expected * 0.1, "row kind {i}: {count}");
    }

    let gradient_expected = n as f64 / 6.0;
    for (i, &count) in gradient_counts.iter().enumerate() {
        assert!((count as f64 - gradient_expected).abs() < gradient_expected * 0.1, "gradient {i}: {count}");
    }

    // Conditioning on >1 colored node biases the rate upward; it still sits
    // well away from 0 and 1.
    let colored_rate = colored as f64 / nodes as f64;
    assert!(colored_rate > 0.35 && colored_rate < 0.6, "colored rate {colored_rate}");
}

#[test]
fn invariant_overall_colored_rate() {
    let mut colored = 0usize;
    let mut nodes = 0usize;
    for seed in corpus(20_000) {
        let d = generate(&seed);
        colored += d.colored_nodes().iter().filter(|&&c| c).count();
        nodes += d.total_nodes();
    }
    // 35% per node plus the occasional forced node.
    let rate = colored as f64 / nodes as f64;
    assert!(rate > 0.34 && rate < 0.42, "colored rate {rate}");
}

#[test]
fn invariant_description_json_roundtrip_validates() {
    let d = generate("roundtrip");
    let json = serde_json::to_string(&d).unwrap();
    let back: AvatarDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);

    let tampered = json.replace("true", "false");
    assert!(serde_json::from_str::<AvatarDescription>(&tampered).is_err());
}

#[test]
fn invariant_render_deterministic() {
    let pipeline = AvatarPipeline::new(RenderConfig::default().with_size(64)).unwrap();
    let a = pipeline.export("render me").unwrap();
    let b = pipeline.export("render me").unwrap();
    assert_eq!(a.hash, b.hash);
    assert_eq!(a.description, generate("render me"));
}

#[test]
fn invariant_different_seeds_render_differently() {
    let pipeline = AvatarPipeline::new(RenderConfig::default().with_size(64)).unwrap();
    let alice = pipeline.export("alice").unwrap();
    let upper = pipeline.export("Alice").unwrap();
    assert_ne!(alice.hash, upper.hash);
    assert_ne!(alice.fingerprint, upper.fingerprint);
}

#[test]
fn invariant_threads_need_no_coordination() {
    let handles: Vec<_> = (0..4)
        .map(|t| std::thread::spawn(move || {
            corpus(50).iter().map(|s| generate(&format!("{t}:{s}"))).collect::<Vec<_>>()
        }))
        .collect();
    for (t, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap();
        for (s, d) in corpus(50).iter().zip(results) {
            assert_eq!(d, generate(&format!("{t}:{s}")));
        }
    }
}
