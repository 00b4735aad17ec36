//! Coloured gemstone strategy.

use feed_model::Category;

use super::{CategoryStrategy, ColumnSet, ItemAttributes, PriceSources};

const GEMSTONE_COLUMNS: ColumnSet = ColumnSet {
    identifier: &["ReportNo", "reportNo", "Report No", "certificateNumber", "Certificate Number"],
    fallback_identifier: &["stockId", "Stock ID", "stock_id", "id", "ID"],
    image: &["image", "Image", "imageUrl", "image_url"],
    shape: &["shape", "Shape"],
    carats: &["carats", "Carats", "carat", "Carat", "weight"],
    color: &["Color", "color", "col"],
    clarity: &["Clarity", "clarity", "clar"],
    cut: &["Cut", "cut"],
    polish: &[],
    symmetry: &[],
    fluorescence: &[],
    lab: &["Lab", "lab"],
    length: &["length", "Length"],
    width: &["width", "Width"],
    height: &["height", "Height"],
    table: &[],
    depth: &[],
    gem_type: &["gemType", "Gem Type", "gem_type"],
    treatment: &["Treatment", "treatment"],
    origin: &["Mine of Origin", "origin", "Origin"],
};

const GEMSTONE_PRICES: PriceSources = PriceSources {
    direct: &["markupPrice", "deliveredPrice", "price", "Price", "Total Price"],
    unit_price: &["pricePerCarat", "Price Per Carat", "price_per_carat"],
    quantity: &["carats", "Carats", "carat"],
    currency: &["markupCurrency", "currency", "Currency"],
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Gemstone;

impl CategoryStrategy for Gemstone {
    fn category(&self) -> Category {
        Category::Gemstone
    }

    fn columns(&self) -> &ColumnSet {
        &GEMSTONE_COLUMNS
    }

    fn price_sources(&self) -> &PriceSources {
        &GEMSTONE_PRICES
    }

    fn title(&self, item: &ItemAttributes<'_>) -> String {
        format!(
            "{} {} {} Gemstone - {} Carats, {} Clarity, {} Cut, {} Certified",
            item.shape, item.color, item.gem_type, item.carats, item.clarity, item.cut, item.lab
        )
    }

    fn description(&self, item: &ItemAttributes<'_>) -> String {
        format!(
            "{} {} {} Gemstone - {} carats, clarity: {}, cut: {}, lab: {}, \
             treatment: {}, origin: {}, size: {}x{} mm.",
            item.shape,
            item.gem_type,
            item.color,
            item.carats,
            item.clarity,
            item.cut,
            item.lab,
            item.treatment,
            item.origin,
            item.length,
            item.width,
        )
    }

    fn link(&self, item: &ItemAttributes<'_>) -> String {
        format!(
            "https://leeladiamond.com/pages/gemstone-catalog?id={}",
            item.identifier
        )
    }
}
