//! Renderer, extractor and selection mapper working together

use stampnote::render::{extract, render, to_html, HtmlOptions, RenderNode};
use stampnote::selection::{restore, save, SelectionOffsets};
use stampnote::stamps::StampMap;

fn stamps() -> StampMap {
    StampMap::from_pairs([("Sparkle", "https://img/s.png"), ("Spark", "https://img/p.png")])
}

const SAMPLES: &[&str] = &[
    "",
    "plain text",
    "intro - 1:05  outro",
    "1:02:05\n\n - 12:34  end",
    "SparkleSpark Sparkles",
    "12:34:5 and 1:23:45:67 and 123:45",
    "改行\n1:10 ネタバレ\nSparkle",
    "\n\n",
];

#[test]
fn test_extract_inverts_render() {
    let stamps = stamps();
    for sample in SAMPLES {
        assert_eq!(&extract(&render(sample, &stamps)), sample);
    }
}

#[test]
fn test_longest_stamp_name_wins() {
    let tree = render("SparkleSpark", &stamps());
    assert_eq!(
        tree,
        RenderNode::container(vec![
            RenderNode::stamp("Sparkle", "https://img/s.png"),
            RenderNode::stamp("Spark", "https://img/p.png"),
        ])
    );
}

#[test]
fn test_selection_round_trip_outside_tokens() {
    let stamps = stamps();
    for sample in SAMPLES {
        let tree = render(sample, &stamps);
        let len = sample.chars().count();
        for start in 0..=len {
            for end in start..=len {
                let offsets = SelectionOffsets::new(start, end);
                let restored = save(&tree, &restore(&tree, offsets));
                // Offsets strictly inside a token collapse to its start
                assert!(restored.start <= offsets.start, "{sample:?} {offsets:?}");
                assert!(restored.end <= offsets.end, "{sample:?} {offsets:?}");
                let again = save(&tree, &restore(&tree, restored));
                assert_eq!(again, restored, "{sample:?} {offsets:?}");
            }
        }
    }
}

#[test]
fn test_markup_for_rendered_note() {
    let tree = render("a 1:10\nSparkle", &stamps());
    let html = to_html(&tree, &HtmlOptions::default());
    assert_eq!(
        html,
        "a <span class=\"ts ts-banned\" data-seconds=\"70\">1:10</span><br>\
         <img class=\"stamp\" src=\"https://img/s.png\" alt=\"Sparkle\" title=\"Sparkle\">"
    );
}
