// End-to-end inference scenarios over synthetic books.

use tocscan_core::{infer, normalize_newlines};

const HAN_NUMERALS: [&str; 20] = [
    "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "十二", "十三", "十四",
    "十五", "十六", "十七", "十八", "十九", "二十",
];

const HAN_TITLES: [&str; 20] = [
    "风起", "云落", "夜航", "归途", "山门", "旧宅", "灯影", "渡口", "雪径", "空城", "断桥",
    "残卷", "孤舟", "星野", "潮声", "岔路", "炉火", "霜降", "远信", "终章",
];

// None of these start a line with 第, none contain 章 after a line-leading 第,
// and two of them mention 第 so the character also occurs outside headings.
const HAN_BODY: [&str; 8] = [
    "山路在雨里弯了又弯，没有人说话。",
    "这样过了第二天，行李还是那么重。",
    "火堆的光照不远，夜色把一切收拢。",
    "他数着步子往前走，数到后来就乱了。",
    "村口的狗叫了两声，又安静下去。",
    "信纸在口袋里磨得起了毛边。",
    "等到第二次回头，渡船已经开远。",
    "茶凉了没有人续，灰落在桌沿上。",
];

fn han_book() -> String {
    let mut text = String::new();
    for (i, (numeral, title)) in HAN_NUMERALS.iter().zip(HAN_TITLES).enumerate() {
        text.push_str(&format!("第{numeral}章 {title}\n"));
        for j in 0..10 {
            text.push_str(HAN_BODY[(i + j) % HAN_BODY.len()]);
            text.push('\n');
        }
    }
    text
}

const ROMAN_NUMERALS: [&str; 20] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
    "XV", "XVI", "XVII", "XVIII", "XIX", "XX",
];

const ROMAN_TITLES: [&str; 20] = [
    "Nightfall", "Harbor", "Embers", "Crossing", "Thaw", "Lanterns", "Driftwood", "Hollow",
    "Breakers", "Orchard", "Fathoms", "Gleaning", "Quarry", "Saltmarsh", "Vigil", "Wake",
    "Furrow", "Keel", "Bellows", "Homecoming",
];

const ROMAN_BODY: [&str; 6] = [
    "The road bent northward under a heavy sky and nobody spoke for an hour.",
    "Rain gathered in the ruts and the horses slowed to a walk.",
    "By evening the fires were low and the talk turned to home.",
    "Someone sang an old song about the harvest and the rest hummed along.",
    "At dawn the frost lay thick on the canvas and on the grass.",
    "They counted the remaining loaves and said nothing about the number.",
];

fn roman_book() -> String {
    let mut text = String::new();
    for (i, (numeral, title)) in ROMAN_NUMERALS.iter().zip(ROMAN_TITLES).enumerate() {
        text.push_str(&format!("Chapter {numeral}. {title}\n"));
        for j in 0..6 {
            text.push_str(ROMAN_BODY[(i + j) % ROMAN_BODY.len()]);
            text.push('\n');
        }
    }
    text
}

fn numbered_book(numbers: &[i64]) -> String {
    let mut text = String::new();
    for n in numbers {
        text.push_str(&format!("{n}. Waypoint\n"));
        for _ in 0..5 {
            text.push_str("The trail ran level here and the walking was easy for once\n");
        }
    }
    text
}

#[test]
fn han_chapters_are_found_with_their_template() {
    let article = han_book();
    let toc = infer(&article).expect("a 20-chapter book has a TOC");

    assert_eq!(toc.content.len(), 20);
    assert!(
        toc.template.contains('第') && toc.template.contains('章'),
        "unexpected template {:?}",
        toc.template
    );
    assert!(toc.beauty >= 0.3, "beauty {} too low", toc.beauty);
    assert!(toc.beauty <= 1.0);

    // Every cursor points at the start of its heading line.
    for (entry, title) in toc.content.iter().zip(HAN_TITLES) {
        let rest = &article[entry.cursor..];
        assert!(rest.starts_with('第'), "cursor not at a heading start");
        assert!(entry.title.ends_with(title));
        assert_eq!(entry.title, rest[..rest.find('\n').unwrap()].trim());
    }
}

#[test]
fn roman_chapters_are_found_in_order() {
    let toc = infer(&roman_book()).expect("a roman-numbered book has a TOC");

    assert_eq!(toc.content.len(), 20);
    assert!(
        toc.template.starts_with("Chapter *"),
        "unexpected template {:?}",
        toc.template
    );
    let numbers: Vec<i64> = toc.content.iter().filter_map(|e| e.number).collect();
    assert_eq!(numbers, (1..=20).collect::<Vec<i64>>());

    let mut cursors = toc.content.iter().map(|e| e.cursor);
    let mut previous = cursors.next().expect("nonempty");
    for cursor in cursors {
        assert!(cursor > previous, "cursors must strictly increase");
        previous = cursor;
    }
}

#[test]
fn generic_letter_prefixes_are_rejected() {
    let subjects = [
        "marsh", "garden", "harbor", "stone", "bell", "archway", "orchard", "tern",
    ];
    let states = [
        "stands empty tonight",
        "waits for the tide",
        "keeps its own counsel",
        "holds the late light",
    ];
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!(
            "Note: the {} {}\n",
            subjects[i % subjects.len()],
            states[(i / subjects.len()) % states.len()]
        ));
    }
    assert!(infer(&text).is_none());
}

#[test]
fn a_hole_in_the_numbering_weakens_but_keeps_the_toc() {
    let complete = infer(&numbered_book(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])).expect("complete run");
    let holed = infer(&numbered_book(&[1, 2, 3, 4, 5, 7, 8, 9, 10])).expect("one hole");

    assert_eq!(holed.content.len(), 9);
    assert!(holed.content.iter().all(|e| e.number.is_some()));
    assert!(
        holed.beauty < complete.beauty,
        "hole should cost beauty: {} vs {}",
        holed.beauty,
        complete.beauty
    );
}

#[test]
fn three_zero_variance_headings_are_enough() {
    let toc = infer(&numbered_book(&[1, 2, 3])).expect("three regular chapters");
    assert_eq!(toc.content.len(), 3);
    assert!(toc.beauty > 0.0 && toc.beauty <= 1.0);
}

#[test]
fn bare_heading_list_scores_below_threshold() {
    // Headings with no bodies: the heading mass covers almost none of the
    // article, so no candidate survives re-scoring.
    assert!(infer("1. a\n2. b\n3. c\n").is_none());
}

#[test]
fn a_dominant_appendix_does_not_hide_the_chapters() {
    let mut text = String::new();
    for n in 1..=20 {
        text.push_str(&format!("{n}. Waypoint\n"));
        for _ in 0..5 {
            text.push_str("The trail ran level here and the walking was easy for once\n");
        }
    }
    text.push_str("Appendix\n");
    for _ in 0..25 {
        text.push_str("Tables of distances and provisions, of no narrative interest at all\n");
    }

    let toc = infer(&text).expect("appendix must not erase the TOC");
    assert_eq!(toc.content.len(), 20);
}

#[test]
fn empty_article_has_no_toc() {
    assert!(infer("").is_none());
    assert!(infer("\n\n\n").is_none());
}

#[test]
fn inference_is_idempotent() {
    let article = han_book();
    let first = infer(&article);
    let second = infer(&article);
    assert_eq!(first, second);
}

#[test]
fn crlf_input_normalizes_to_the_same_result() {
    let article = roman_book();
    let crlf = article.replace('\n', "\r\n");
    let normalized = normalize_newlines(&crlf);
    assert_eq!(infer(&article), infer(&normalized));
}
