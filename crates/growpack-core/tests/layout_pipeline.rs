use growpack_core::config::{PackerConfig, SortOrder};
use growpack_core::error::GrowPackError;
use growpack_core::model::Block;
use growpack_core::{pack_layout, sort_blocks};
use rand::{Rng, SeedableRng};

fn b(label: &str, w: f64, h: f64) -> Block {
    Block::new(label.to_string(), w, h)
}

fn cfg(order: SortOrder) -> PackerConfig {
    PackerConfig::builder().sort_order(order).build()
}

fn labels(layout: &growpack_core::Layout) -> Vec<&str> {
    layout.frames.iter().map(|f| f.label.as_str()).collect()
}

#[test]
fn height_desc_is_the_default_and_stable() {
    assert_eq!(PackerConfig::default().sort_order, SortOrder::HeightDesc);
    let blocks = vec![b("c", 5.0, 1.0), b("a", 2.0, 3.0), b("b", 1.0, 3.0)];
    let layout = pack_layout(blocks, PackerConfig::default()).unwrap();

    assert_eq!(labels(&layout), vec!["a", "b", "c"]);
    let xs: Vec<f64> = layout.frames.iter().map(|f| f.frame.x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 3.0]);
    assert_eq!((layout.width, layout.height), (8.0, 3.0));
    assert!(layout.is_complete());
}

#[test]
fn sort_orders_arrange_blocks() {
    let base = vec![
        b("m", 1.0, 4.0),
        b("z", 3.0, 2.0),
        b("a", 2.0, 2.0),
        b("k", 5.0, 1.0),
    ];
    let order_of = |order: SortOrder| {
        let mut v = base.clone();
        sort_blocks(&mut v, order);
        v.into_iter().map(|b| b.label).collect::<Vec<_>>()
    };
    assert_eq!(order_of(SortOrder::HeightDesc), vec!["m", "z", "a", "k"]);
    assert_eq!(order_of(SortOrder::WidthDesc), vec!["k", "z", "a", "m"]);
    assert_eq!(order_of(SortOrder::AreaDesc), vec!["z", "k", "m", "a"]);
    assert_eq!(order_of(SortOrder::MaxSideDesc), vec!["k", "m", "z", "a"]);
    assert_eq!(order_of(SortOrder::NameAsc), vec!["a", "k", "m", "z"]);
    assert_eq!(order_of(SortOrder::None), vec!["m", "z", "a", "k"]);
}

#[test]
fn empty_input_is_an_empty_layout() {
    let layout = pack_layout(Vec::<Block>::new(), PackerConfig::default()).unwrap();
    assert_eq!((layout.width, layout.height), (0.0, 0.0));
    assert!(layout.frames.is_empty());
    assert!(layout.unplaced.is_empty());
    assert!(layout.ensure_complete().is_ok());
    let stats = layout.stats();
    assert_eq!(stats.occupancy, 0.0);
    assert_eq!(stats.waste_percentage(), 0.0);
}

#[test]
fn invalid_block_is_rejected_before_packing() {
    let blocks = vec![b("ok", 1.0, 1.0), b("flat", 1.0, 0.0)];
    match pack_layout(blocks, PackerConfig::default()) {
        Err(GrowPackError::InvalidBlock { index, label, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(label, "flat");
        }
        other => panic!("Expected InvalidBlock error, got {:?}", other.map(|l| l.frames.len())),
    }
}

#[test]
fn unplaced_blocks_are_reported_not_raised() {
    let blocks = vec![b("small", 2.0, 2.0), b("big", 3.0, 3.0)];
    let layout = pack_layout(blocks, cfg(SortOrder::None)).unwrap();

    assert_eq!(labels(&layout), vec!["small"]);
    assert_eq!(layout.unplaced.len(), 1);
    assert_eq!(layout.unplaced[0].label, "big");
    assert!(layout.unplaced[0].fit.is_none());
    match layout.ensure_complete() {
        Err(GrowPackError::Unplaced { unplaced, total }) => {
            assert_eq!(unplaced, 1);
            assert_eq!(total, 2);
        }
        other => panic!("Expected Unplaced error, got {:?}", other),
    }
    let stats = layout.stats();
    assert_eq!(stats.num_blocks, 2);
    assert_eq!(stats.num_unplaced, 1);
}

#[test]
fn height_desc_packs_what_input_order_cannot() {
    let blocks = vec![b("small", 2.0, 2.0), b("big", 3.0, 3.0)];
    let layout = pack_layout(blocks, cfg(SortOrder::HeightDesc)).unwrap();
    assert!(layout.is_complete());
    assert_eq!(labels(&layout), vec!["big", "small"]);
}

#[test]
fn stats_report_occupancy() {
    let blocks = vec![b("a", 2.0, 2.0), b("b", 2.0, 2.0), b("c", 2.0, 1.0)];
    let layout = pack_layout(blocks, PackerConfig::default()).unwrap();
    let stats = layout.stats();
    assert_eq!(stats.canvas_area, 12.0);
    assert_eq!(stats.used_area, 10.0);
    assert!((stats.occupancy - 10.0 / 12.0).abs() < 1e-12);
    assert_eq!(stats.wasted_area(), 2.0);
    assert_eq!(stats.growth_events, 2);
    assert!(stats.summary().contains("Placed: 3"));
}

#[test]
fn auto_is_never_worse_than_any_portfolio_member() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(9);
    let blocks: Vec<Block> = (0..80)
        .map(|i| {
            let w = rng.gen_range(1..=30) as f64;
            let h = rng.gen_range(1..=30) as f64;
            b(&format!("p{}", i), w, h)
        })
        .collect();

    let auto = pack_layout(blocks.clone(), cfg(SortOrder::Auto)).unwrap();
    let auto_area = auto.width * auto.height;
    for order in SortOrder::PORTFOLIO {
        let single = pack_layout(blocks.clone(), cfg(order)).unwrap();
        assert!(auto.unplaced.len() <= single.unplaced.len());
        if auto.unplaced.len() == single.unplaced.len() {
            assert!(auto_area <= single.width * single.height, "{:?}", order);
        }
    }
    assert_eq!(auto.frames.len() + auto.unplaced.len(), blocks.len());
}

#[test]
fn auto_rescues_input_order_failures() {
    let blocks = vec![b("small", 2.0, 2.0), b("big", 3.0, 3.0)];
    let layout = pack_layout(blocks, cfg(SortOrder::Auto)).unwrap();
    assert!(layout.is_complete());
}

#[test]
fn parallel_flag_gives_same_result() {
    let blocks: Vec<Block> = (1..=40)
        .map(|i| b(&format!("q{}", i), (i % 7 + 1) as f64, (i % 5 + 1) as f64))
        .collect();
    let seq = pack_layout(blocks.clone(), cfg(SortOrder::Auto)).unwrap();
    let par = pack_layout(
        blocks,
        PackerConfig::builder()
            .sort_order(SortOrder::Auto)
            .parallel(true)
            .build(),
    )
    .unwrap();
    assert_eq!((seq.width, seq.height), (par.width, par.height));
    let a: Vec<_> = seq.frames.iter().map(|f| (f.label.clone(), f.frame)).collect();
    let b: Vec<_> = par.frames.iter().map(|f| (f.label.clone(), f.frame)).collect();
    assert_eq!(a, b);
}
