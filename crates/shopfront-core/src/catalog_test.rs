use rust_decimal_macros::dec;

use super::*;
use crate::test_support::{category, product};

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn price_range_is_inclusive_and_sorts_ascending() {
    let a = product("A", dec!(100), Some(dec!(10)), 1);
    let b = product("B", dec!(50), Some(dec!(0)), 2);
    let filter = ListingFilter {
        min_price: dec!(50),
        max_price: dec!(90),
        sort: SortKey::PriceLow,
        ..ListingFilter::default()
    };

    let out = filter_and_sort(&[a, b], &filter);

    assert_eq!(ids(&out), vec!["B", "A"]);
    assert_eq!(out[1].effective_price(), dec!(90));
}

#[test]
fn price_low_is_non_decreasing_and_price_high_non_increasing() {
    let products: Vec<Product> = [
        ("a", dec!(300), None),
        ("b", dec!(120), Some(dec!(50))),
        ("c", dec!(75), None),
        ("d", dec!(1000), Some(dec!(95))),
        ("e", dec!(60), Some(dec!(0))),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, price, discount))| product(id, price, discount, u32::try_from(i).unwrap() + 1))
    .collect();

    let low = filter_and_sort(
        &products,
        &ListingFilter {
            sort: SortKey::PriceLow,
            ..ListingFilter::default()
        },
    );
    assert!(low
        .windows(2)
        .all(|w| w[0].effective_price() <= w[1].effective_price()));

    let high = filter_and_sort(
        &products,
        &ListingFilter {
            sort: SortKey::PriceHigh,
            ..ListingFilter::default()
        },
    );
    assert!(high
        .windows(2)
        .all(|w| w[0].effective_price() >= w[1].effective_price()));
}

#[test]
fn newest_sorts_by_creation_descending() {
    let products = vec![
        product("old", dec!(10), None, 1),
        product("new", dec!(10), None, 20),
        product("mid", dec!(10), None, 10),
    ];
    let out = filter_and_sort(&products, &ListingFilter::default());
    assert_eq!(ids(&out), vec!["new", "mid", "old"]);
}

#[test]
fn equal_prices_keep_input_order() {
    let products = vec![
        product("first", dec!(40), None, 3),
        product("second", dec!(50), Some(dec!(20)), 1),
        product("third", dec!(40), None, 2),
    ];
    let out = filter_and_sort(
        &products,
        &ListingFilter {
            sort: SortKey::PriceLow,
            ..ListingFilter::default()
        },
    );
    assert_eq!(ids(&out), vec!["first", "second", "third"]);
}

#[test]
fn category_filter_also_matches_subcategory_id() {
    let mut direct = product("direct", dec!(10), None, 1);
    direct.category_id = "lamps".to_string();
    let mut via_sub = product("via-sub", dec!(10), None, 2);
    via_sub.category_id = "decor".to_string();
    via_sub.subcategory_id = Some("lamps".to_string());
    let other = product("other", dec!(10), None, 3);

    let out = filter_and_sort(
        &[direct, via_sub, other],
        &ListingFilter {
            category_id: Some("lamps".to_string()),
            ..ListingFilter::default()
        },
    );
    let mut got = ids(&out);
    got.sort_unstable();
    assert_eq!(got, vec!["direct", "via-sub"]);
}

#[test]
fn subcategory_filter_excludes_siblings_and_parent_direct_products() {
    let mut parent_direct = product("parent", dec!(10), None, 1);
    parent_direct.category_id = "decor".to_string();
    let mut in_s = product("in-s", dec!(10), None, 2);
    in_s.category_id = "decor".to_string();
    in_s.subcategory_id = Some("S".to_string());
    let mut sibling = product("sibling", dec!(10), None, 3);
    sibling.category_id = "decor".to_string();
    sibling.subcategory_id = Some("T".to_string());

    let out = filter_and_sort(
        &[parent_direct, in_s, sibling],
        &ListingFilter {
            category_id: Some("decor".to_string()),
            subcategory_id: Some("S".to_string()),
            ..ListingFilter::default()
        },
    );
    assert_eq!(ids(&out), vec!["in-s"]);
}

#[test]
fn sort_key_parses_known_values_and_defaults_to_newest() {
    assert_eq!(SortKey::parse("price-low"), SortKey::PriceLow);
    assert_eq!(SortKey::parse("price-high"), SortKey::PriceHigh);
    assert_eq!(SortKey::parse("newest"), SortKey::Newest);
    assert_eq!(SortKey::parse("random"), SortKey::Newest);
}

#[test]
fn query_pairs_omit_defaults() {
    assert!(ListingFilter::default().query_pairs().is_empty());

    let filter = ListingFilter {
        category_id: Some("c1".to_string()),
        subcategory_id: None,
        min_price: dec!(100),
        max_price: dec!(5000.00),
        sort: SortKey::PriceHigh,
    };
    assert_eq!(
        filter.query_pairs(),
        vec![
            ("category", "c1".to_string()),
            ("sort", "price-high".to_string()),
            ("minPrice", "100".to_string()),
            ("maxPrice", "5000".to_string()),
        ]
    );
}

#[test]
fn active_products_drop_inactive() {
    let mut hidden = product("hidden", dec!(10), None, 1);
    hidden.status = crate::products::ProductStatus::Inactive;
    let shown = product("shown", dec!(10), None, 2);
    assert_eq!(ids(&active_products(&[hidden, shown])), vec!["shown"]);
}

#[test]
fn hierarchy_helpers_split_main_and_subcategories() {
    let categories = vec![
        category("decor", "m1", None),
        category("lamps", "m1", Some("decor")),
        category("rugs", "m1", Some("decor")),
        category("kitchen", "m2", None),
    ];

    let mains: Vec<&str> = main_categories(&categories).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(mains, vec!["decor", "kitchen"]);

    let subs: Vec<&str> = subcategories_of(&categories, "decor")
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(subs, vec!["lamps", "rugs"]);

    assert_eq!(categories_for_module(&categories, "m2").len(), 1);
}

#[test]
fn parent_candidates_exclude_subcategories_other_modules_and_self() {
    let categories = vec![
        category("decor", "m1", None),
        category("garden", "m1", None),
        category("lamps", "m1", Some("decor")),
        category("kitchen", "m2", None),
    ];
    let candidates: Vec<&str> = parent_candidates(&categories, "m1", Some("garden"))
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(candidates, vec!["decor"]);
}

#[test]
fn validate_parent_enforces_single_level_nesting() {
    let categories = vec![
        category("decor", "m1", None),
        category("lamps", "m1", Some("decor")),
        category("kitchen", "m2", None),
        category("living", "m1", None),
    ];

    assert_eq!(validate_parent(&categories, "m1", None, None), Ok(()));
    assert_eq!(validate_parent(&categories, "m1", None, Some("decor")), Ok(()));
    assert_eq!(
        validate_parent(&categories, "m1", None, Some("lamps")),
        Err(CatalogError::NestedTooDeep("lamps".to_string()))
    );
    assert_eq!(
        validate_parent(&categories, "m1", None, Some("ghost")),
        Err(CatalogError::UnknownParent("ghost".to_string()))
    );
    assert!(matches!(
        validate_parent(&categories, "m1", None, Some("kitchen")),
        Err(CatalogError::ModuleMismatch { .. })
    ));
    assert_eq!(
        validate_parent(&categories, "m1", Some("decor"), Some("decor")),
        Err(CatalogError::SelfParent)
    );
    assert_eq!(
        validate_parent(&categories, "m1", Some("decor"), Some("living")),
        Err(CatalogError::HasSubcategories("decor".to_string()))
    );
    assert_eq!(validate_parent(&categories, "m1", Some("decor"), None), Ok(()));
    assert_eq!(
        validate_parent(&categories, "m1", Some("living"), Some("decor")),
        Ok(())
    );
}

#[test]
fn slugify_collapses_separators() {
    assert_eq!(slugify("Home & Living"), "home-living");
    assert_eq!(slugify("  Brass -- Diyas!  "), "brass-diyas");
    assert_eq!(slugify("Kids' Toys 2025"), "kids-toys-2025");
    assert_eq!(slugify("***"), "");
}
