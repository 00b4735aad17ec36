//! Natural and lab-grown diamond strategies.
//!
//! Both exports share one schema; they differ only in wording and link shape.

use feed_model::Category;

use super::{CategoryStrategy, ColumnSet, ItemAttributes, PriceSources};

const STORE_PAGES: &str = "https://leeladiamond.com/pages";

const DIAMOND_COLUMNS: ColumnSet = ColumnSet {
    identifier: &["ReportNo", "reportNo", "Report No", "certificateNumber", "Certificate Number"],
    fallback_identifier: &["stockId", "Stock ID", "stock_id", "id", "ID"],
    image: &["image", "Image", "imageUrl", "image_url"],
    shape: &["shape", "Shape"],
    carats: &["carats", "carat", "Carats", "Carat", "weight"],
    color: &["col", "color", "Color"],
    clarity: &["clar", "clarity", "Clarity"],
    cut: &["cut", "Cut"],
    polish: &["pol", "polish", "Polish"],
    symmetry: &["symm", "symmetry", "Symmetry"],
    fluorescence: &["flo", "fluorescence", "Fluorescence"],
    lab: &["lab", "Lab"],
    length: &["length", "Length"],
    width: &["width", "Width"],
    height: &["height", "Height"],
    table: &["table", "Table"],
    depth: &["depth", "Depth"],
    gem_type: &[],
    treatment: &[],
    origin: &[],
};

const DIAMOND_PRICES: PriceSources = PriceSources {
    direct: &["markupPrice", "deliveredPrice", "price"],
    unit_price: &["pricePerCarat", "price_per_carat"],
    quantity: &["carats", "carat"],
    currency: &["markupCurrency", "currency"],
};

fn diamond_title(item: &ItemAttributes<'_>, kind: &str) -> String {
    format!(
        "{shape}-{carats} Carats-{color} Color-{clarity} Clarity-{lab} Certified-{shape}-{kind}",
        shape = item.shape,
        carats = item.carats,
        color = item.color,
        clarity = item.clarity,
        lab = item.lab,
    )
}

fn diamond_description(item: &ItemAttributes<'_>, origin: &str) -> String {
    format!(
        "Discover sustainable luxury with our {origin} {shape} diamond: \
         {carats} carats, {color} color, and {clarity} clarity. \
         Measurements: {length}-{width}x{height} mm. \
         Cut: {cut}, Polish: {polish}, Symmetry: {symmetry}, \
         Table: {table}%, Depth: {depth}%, Fluorescence: {fluorescence}. \
         {lab} certified {shape}",
        shape = item.shape,
        carats = item.carats,
        color = item.color,
        clarity = item.clarity,
        length = item.length,
        width = item.width,
        height = item.height,
        cut = item.cut,
        polish = item.polish,
        symmetry = item.symmetry,
        table = item.table,
        depth = item.depth,
        fluorescence = item.fluorescence,
        lab = item.lab,
    )
}

/// Mined diamonds; links point at the catalog page by report number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDiamond;

impl CategoryStrategy for NaturalDiamond {
    fn category(&self) -> Category {
        Category::Natural
    }

    fn columns(&self) -> &ColumnSet {
        &DIAMOND_COLUMNS
    }

    fn price_sources(&self) -> &PriceSources {
        &DIAMOND_PRICES
    }

    fn title(&self, item: &ItemAttributes<'_>) -> String {
        diamond_title(item, "Natural Diamond")
    }

    fn description(&self, item: &ItemAttributes<'_>) -> String {
        diamond_description(item, "natural")
    }

    fn link(&self, item: &ItemAttributes<'_>) -> String {
        format!("{STORE_PAGES}/natural-diamond-catalog?id={}", item.identifier)
    }
}

/// Lab-grown diamonds; links use a descriptive slug.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabGrownDiamond;

impl CategoryStrategy for LabGrownDiamond {
    fn category(&self) -> Category {
        Category::LabGrown
    }

    fn columns(&self) -> &ColumnSet {
        &DIAMOND_COLUMNS
    }

    fn price_sources(&self) -> &PriceSources {
        &DIAMOND_PRICES
    }

    fn title(&self, item: &ItemAttributes<'_>) -> String {
        diamond_title(item, "Lab Grown Diamond")
    }

    fn description(&self, item: &ItemAttributes<'_>) -> String {
        diamond_description(item, "lab-grown")
    }

    /// `1.50` carats becomes `1-50`; cut spaces become hyphens; all lower-case.
    fn link(&self, item: &ItemAttributes<'_>) -> String {
        format!(
            "{STORE_PAGES}/lab-grown-diamonds/{shape}-{carats}-carat-{cut}-{clarity}-clarity-{lab}-certified-{id}",
            shape = item.shape.to_lowercase(),
            carats = item.carats.replace('.', "-"),
            cut = item.cut.replace(' ', "-").to_lowercase(),
            clarity = item.clarity.to_lowercase(),
            lab = item.lab.to_lowercase(),
            id = item.identifier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ItemAttributes<'static> {
        ItemAttributes {
            identifier: "LG123",
            shape: "ROUND".to_string(),
            carats: "1.50",
            color: "E",
            clarity: "VS1",
            cut: "Very Good",
            polish: "EX",
            symmetry: "VG",
            fluorescence: "NON",
            lab: "IGI",
            length: "7.1",
            width: "7.2",
            height: "4.4",
            table: "57",
            depth: "61.5",
            ..ItemAttributes::default()
        }
    }

    #[test]
    fn natural_title_and_link() {
        let item = item();
        assert_eq!(
            NaturalDiamond.title(&item),
            "ROUND-1.50 Carats-E Color-VS1 Clarity-IGI Certified-ROUND-Natural Diamond"
        );
        assert_eq!(
            NaturalDiamond.link(&item),
            "https://leeladiamond.com/pages/natural-diamond-catalog?id=LG123"
        );
    }

    #[test]
    fn lab_grown_link_is_slugged() {
        assert_eq!(
            LabGrownDiamond.link(&item()),
            "https://leeladiamond.com/pages/lab-grown-diamonds/round-1-50-carat-very-good-vs1-clarity-igi-certified-LG123"
        );
    }

    #[test]
    fn description_mentions_measurements() {
        let text = LabGrownDiamond.description(&item());
        assert!(text.starts_with("Discover sustainable luxury with our lab-grown ROUND diamond: "));
        assert!(text.contains("Measurements: 7.1-7.2x4.4 mm."));
        assert!(text.contains("Table: 57%, Depth: 61.5%, Fluorescence: NON."));
        assert!(text.ends_with("IGI certified ROUND"));
    }
}
