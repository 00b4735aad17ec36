//! Serialized feed layout.

use feed_model::{CanonicalRow, Category, FeedConstants};
use feed_output::{CombinedFeed, FEED_FILE_NAME, read_feed, write_feed, write_feed_to};

fn item(id: &str, title: &str, price: &str) -> CanonicalRow {
    let constants = FeedConstants::default();
    CanonicalRow {
        id: format!("{id}{}", constants.market_suffix),
        title: title.to_string(),
        description: String::new(),
        link: format!("https://leeladiamond.com/pages/natural-diamond-catalog?id={id}"),
        image_link: String::new(),
        availability: constants.availability,
        price: price.to_string(),
        google_product_category: constants.google_product_category,
        brand: constants.brand,
        mpn: format!("{id}{}", constants.market_suffix),
        condition: constants.condition,
        color: constants.color,
        age_group: constants.age_group,
        gender: constants.gender,
    }
}

fn sample_feed() -> CombinedFeed {
    CombinedFeed::assemble([
        (Category::Gemstone, vec![item("G1", "OVAL Blue, Sapphire", "1269.00 CAD")]),
        (Category::Natural, vec![item("1111", "ROUND-1.01 Carats", "1410.00 CAD")]),
    ])
    .expect("feed has rows")
}

#[test]
fn serialized_feed_snapshot() {
    let mut out = Vec::new();
    write_feed_to(&mut out, &sample_feed()).expect("write feed");
    let text = String::from_utf8(out).expect("feed is utf-8");

    insta::assert_snapshot!(text.trim_end(), @r#"
id,title,description,link,image_link,availability,price,google_product_category,brand,mpn,condition,color,age_group,gender
1111CA,ROUND-1.01 Carats,,https://leeladiamond.com/pages/natural-diamond-catalog?id=1111,,in_stock,1410.00 CAD,188,Leela Diamonds,1111CA,new,white/yellow/rose gold,adult,unisex
G1CA,"OVAL Blue, Sapphire",,https://leeladiamond.com/pages/natural-diamond-catalog?id=G1,,in_stock,1269.00 CAD,188,Leela Diamonds,G1CA,new,white/yellow/rose gold,adult,unisex
"#);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(FEED_FILE_NAME);
    let feed = sample_feed();

    write_feed(&path, &feed).expect("write feed");
    let rows = read_feed(std::fs::File::open(&path).expect("open feed")).expect("read feed");

    assert_eq!(rows, feed.rows());
}
