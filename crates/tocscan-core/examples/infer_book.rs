//! Build a small Han-numbered book in memory and print the inferred TOC.
//!
//! Run with: cargo run --example infer_book

fn main() {
    let numerals = ["一", "二", "三", "四", "五", "六", "七", "八"];
    let titles = ["风起", "云落", "夜航", "归途", "山门", "旧宅", "灯影", "渡口"];

    let mut article = String::new();
    for (numeral, title) in numerals.iter().zip(titles) {
        article.push_str(&format!("第{numeral}章 {title}\n"));
        article.push_str(&"山路在雨里弯了又弯，第二天行李还是那么重。\n".repeat(8));
    }

    match tocscan_core::infer(&article) {
        Some(toc) => {
            println!("template: {}", toc.template);
            println!("beauty:   {:.3}", toc.beauty);
            for entry in &toc.content {
                println!("  {:>6}  {}", entry.cursor, entry.title);
            }
        }
        None => println!("no table of contents found"),
    }
}
