use growpack_core::config::{PackerConfig, RenderOptions};
use growpack_core::model::{Block, Rect};
use growpack_core::pack_layout;
use growpack_core::render::{label_anchors, label_words, render_svg, save_svg};

fn scenario_layout() -> growpack_core::Layout {
    let blocks = vec![
        Block::new("left side (x2)".to_string(), 2.0, 2.0),
        Block::new("right side".to_string(), 2.0, 2.0),
        Block::new("plinth".to_string(), 2.0, 1.0),
    ];
    pack_layout(blocks, PackerConfig::default()).unwrap()
}

#[test]
fn label_words_stop_at_parenthesis() {
    assert_eq!(label_words("back panel (oak) extra"), vec![(0, "back"), (1, "panel")]);
    assert_eq!(label_words("(note) shelf"), Vec::<(usize, &str)>::new());
    assert!(label_words("").is_empty());
    assert_eq!(label_words("panel(oak)"), vec![(0, "panel(oak)")]);
}

#[test]
fn repeated_spaces_keep_their_slot() {
    assert_eq!(label_words("door  frame"), vec![(0, "door"), (2, "frame")]);
    assert_eq!(label_words(" top"), vec![(1, "top")]);
    assert_eq!(label_words("side\tpanel"), vec![(0, "side\tpanel")]);

    let opts = RenderOptions::default();
    let anchors = label_anchors("door  frame", &Rect::new(0.0, 0.0, 2.0, 2.0), &opts);
    assert_eq!(anchors.len(), 2);
    assert_eq!(anchors[1].word, "frame");
    assert!((anchors[1].x - (0.1 + 0.4 * 3.0)).abs() < 1e-12);
}

#[test]
fn anchors_step_by_text_size() {
    let opts = RenderOptions::default();
    let frame = Rect::new(1.0, 2.0, 3.0, 4.0);
    let anchors = label_anchors("top shelf", &frame, &opts);
    assert_eq!(anchors.len(), 2);
    assert_eq!(anchors[0].word, "top");
    assert!((anchors[0].x - (1.0 + 0.1 + 0.4)).abs() < 1e-12);
    assert!((anchors[1].x - (1.0 + 0.1 + 0.8)).abs() < 1e-12);
    assert!((anchors[0].y - 2.02).abs() < 1e-12);
    assert_eq!(anchors[0].y, anchors[1].y);
}

#[test]
fn svg_has_a_rect_per_frame_and_a_text_per_word() {
    let layout = scenario_layout();
    let doc = render_svg(&layout, &RenderOptions::default());
    let s = doc.to_string();

    assert!(s.contains(r#"viewBox="0 0 4 3""#), "{s}");
    assert_eq!(s.matches("<rect").count(), 3);
    // "left side", "right side", "plinth"
    assert_eq!(s.matches("<text").count(), 5);
    assert!(s.contains("rotate(90"));
    // The full label survives as a tooltip even though only two words are drawn.
    assert!(s.contains("<title"));
    assert!(s.contains("left side (x2)"), "{s}");
}

#[test]
fn empty_layout_renders_an_empty_drawing() {
    let layout: growpack_core::Layout = growpack_core::Layout::empty();
    let s = render_svg(&layout, &RenderOptions::default()).to_string();
    assert!(s.contains(r#"viewBox="0 0 0 0""#));
    assert_eq!(s.matches("<rect").count(), 0);
}

#[test]
fn svg_is_written_to_disk() {
    let dir = std::env::temp_dir().join(format!("growpack_svg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("layout.svg");
    let doc = render_svg(&scenario_layout(), &RenderOptions::default());
    save_svg(&path, &doc).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("<svg"));
    std::fs::remove_dir_all(&dir).ok();
}

#[cfg(feature = "image")]
mod preview {
    use super::scenario_layout;
    use growpack_core::error::GrowPackError;
    use growpack_core::render::{render_preview, save_preview};

    #[test]
    fn preview_size_follows_resolution() {
        let img = render_preview(&scenario_layout(), 10.0).unwrap();
        assert_eq!(img.dimensions(), (40, 30));
        // Frame corners are outlined in black.
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        // Interior of the first frame is filled.
        assert_ne!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert_ne!(img.get_pixel(5, 5).0, [0, 0, 0, 255]);
        // The strip right of the plinth is free space.
        assert_eq!(img.get_pixel(35, 25).0, [255, 255, 255, 255]);
    }

    #[test]
    fn preview_rejects_bad_resolution() {
        let layout = scenario_layout();
        for px in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                render_preview(&layout, px),
                Err(GrowPackError::InvalidConfig(_))
            ));
        }
        assert!(matches!(
            render_preview(&layout, 1e5),
            Err(GrowPackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn preview_is_saved_as_png() {
        let dir = std::env::temp_dir().join(format!("growpack_png_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("layout.png");
        let img = render_preview(&scenario_layout(), 4.0).unwrap();
        save_preview(&path, &img).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        std::fs::remove_dir_all(&dir).ok();
    }
}
