//! Lexical collaboration detector for release articles.
//!
//! An article is a collaboration when it names at least two known brands, or
//! one brand together with a collaboration keyword. Matching is plain
//! substring containment on the lowercased title and description.

use crate::types::{Article, NewCollaboration};

/// Category label attached to every detected collaboration.
pub const COLLAB_CATEGORY: &str = "Sneakers";

/// Brand and artist names the detector recognizes, in reporting order.
pub const BRANDS: &[&str] = &[
    // Sneakers and sportswear
    "Nike",
    "Jordan",
    "Adidas",
    "Yeezy",
    "New Balance",
    "Asics",
    "Puma",
    "Reebok",
    "Converse",
    "Vans",
    "Hoka",
    "On Running",
    "On",
    "Salomon",
    "Saucony",
    // Streetwear
    "Supreme",
    "Palace",
    "BAPE",
    "Stussy",
    "Kith",
    "Off-White",
    "Fear of God",
    "Essentials",
    // Luxury houses
    "Louis Vuitton",
    "Gucci",
    "Dior",
    "Balenciaga",
    "Prada",
    "Loewe",
    "Fendi",
    "Burberry",
    // Japanese labels
    "Comme des Garcons",
    "CDG",
    "Sacai",
    "Undercover",
    "Fragment",
    "WTAPS",
    "Neighborhood",
    // Outdoor
    "The North Face",
    "Stone Island",
    "Moncler",
    "Arc teryx",
    // Artists
    "Travis Scott",
    "Cactus Jack",
    "Bad Bunny",
    "Pharrell",
    "Drake",
    "NOCTA",
    "Kanye",
    "Billie Eilish",
    "Tyler the Creator",
    "ASAP Rocky",
    "J Balvin",
];

/// Phrases that mark an article as describing a joint release.
pub const COLLAB_KEYWORDS: &[&str] = &[
    "collaboration",
    "collab",
    " x ",
    "partnership",
    "capsule",
    "collection",
    "limited edition",
    "exclusive",
    "drop",
    "release",
];

/// Names that flag a collaboration as high-interest.
pub const HOT_KEYWORDS: &[&str] = &[
    "travis scott",
    "off-white",
    "dior",
    "louis vuitton",
    "supreme",
    "fragment",
    "sacai",
    "fear of god",
    "bad bunny",
    "drake",
    "yeezy",
    "balenciaga",
];

/// Brand count at which a collaboration is hot regardless of keywords.
const HOT_BRAND_COUNT: usize = 3;

/// Classify every article, keeping only detected collaborations in input order.
#[must_use]
pub fn detect_collabs(articles: &[Article]) -> Vec<NewCollaboration> {
    articles.iter().filter_map(classify).collect()
}

/// Classify a single article.
///
/// Returns `None` unless the article names two or more brands, or one brand
/// plus a collaboration keyword, and has a non-blank title. Returned brands
/// follow [`BRANDS`] order and are never empty.
#[must_use]
pub fn classify(article: &Article) -> Option<NewCollaboration> {
    let corpus = format!(
        "{} {}",
        article.title,
        article.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    let brands = matched_brands(&corpus);
    let has_keyword = contains_any(&corpus, COLLAB_KEYWORDS);

    let accepted = brands.len() >= 2 || (!brands.is_empty() && has_keyword);
    if !accepted {
        return None;
    }

    let hot = contains_any(&corpus, HOT_KEYWORDS) || brands.len() >= HOT_BRAND_COUNT;

    NewCollaboration::new(
        &article.title,
        brands,
        article.source.clone(),
        article.source_url.clone(),
        article.image_url.clone(),
        COLLAB_CATEGORY.to_string(),
        hot,
    )
    .ok()
}

fn matched_brands(corpus: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for brand in BRANDS {
        if corpus.contains(&brand.to_lowercase()) && !found.iter().any(|b| b == brand) {
            found.push((*brand).to_string());
        }
    }
    found
}

fn contains_any(corpus: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| corpus.contains(needle))
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
