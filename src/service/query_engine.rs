use crate::db::models::Product;
use crate::types::query::{PagedResult, QuerySpec, SortKey};

/// Turns the full product collection into one filtered, sorted page.
///
/// Pure and infallible: unknown sort keys and blank filters have already been
/// folded into defaults by [`QuerySpec`].
pub struct QueryEngine;

impl QueryEngine {
    pub fn list<I>(spec: &QuerySpec, all_products: I) -> PagedResult
    where
        I: IntoIterator<Item = Product>,
    {
        let mut matched: Vec<Product> = match spec.filter_text() {
            Some(needle) => all_products
                .into_iter()
                .filter(|p| p.name.contains(needle))
                .collect(),
            None => all_products.into_iter().collect(),
        };
        let total_items = matched.len();

        // sort_by is stable; ties keep their filtered order
        match spec.sort_by {
            SortKey::Price => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::Name => matched.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        let products = matched
            .into_iter()
            .skip(spec.offset())
            .take(spec.page_size as usize)
            .collect();

        PagedResult {
            products,
            page_number: spec.page_number,
            page_size: spec.page_size,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: "Test product".to_string(),
            price: Decimal::new(price, 0),
            category_id: 1,
            category: None,
        }
    }

    fn seeded() -> Vec<Product> {
        vec![
            product(1, "Smartphone", 699),
            product(2, "Laptop", 1200),
            product(3, "Novel", 20),
        ]
    }

    fn names(result: &PagedResult) -> Vec<&str> {
        result.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn price_sort_first_page_of_two() {
        let spec = QuerySpec {
            sort_by: SortKey::Price,
            page_number: 1,
            page_size: 2,
            ..QuerySpec::default()
        };
        let result = QueryEngine::list(&spec, seeded());
        assert_eq!(names(&result), ["Novel", "Smartphone"]);
        assert_eq!(result.total_items, 3);
        assert_eq!(result.page_size, 2);
    }

    #[test]
    fn filter_is_case_sensitive_substring_on_name() {
        let products = vec![product(1, "Product1", 100), product(2, "Phone", 200)];
        let spec = QuerySpec {
            filter: Some("Phone".to_string()),
            ..QuerySpec::default()
        };
        let result = QueryEngine::list(&spec, products.clone());
        assert_eq!(names(&result), ["Phone"]);
        assert_eq!(result.total_items, 1);

        let spec = QuerySpec {
            filter: Some("phone".to_string()),
            ..QuerySpec::default()
        };
        assert!(QueryEngine::list(&spec, products).products.is_empty());
    }

    #[test]
    fn blank_filter_keeps_everything() {
        let spec = QuerySpec {
            filter: Some("  ".to_string()),
            ..QuerySpec::default()
        };
        assert_eq!(QueryEngine::list(&spec, seeded()).total_items, 3);
    }

    #[test]
    fn default_sort_is_by_name() {
        let result = QueryEngine::list(&QuerySpec::default(), seeded());
        assert_eq!(names(&result), ["Laptop", "Novel", "Smartphone"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let products = vec![
            product(1, "B", 5),
            product(2, "A", 5),
            product(3, "C", 1),
            product(4, "A", 9),
        ];
        let by_price = QuerySpec {
            sort_by: SortKey::Price,
            ..QuerySpec::default()
        };
        let ids: Vec<i64> = QueryEngine::list(&by_price, products.clone())
            .products
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, [3, 1, 2, 4]);

        let ids: Vec<i64> = QueryEngine::list(&QuerySpec::default(), products)
            .products
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, [2, 4, 1, 3]);
    }

    #[test]
    fn pages_concatenate_to_full_sorted_sequence() {
        let products: Vec<Product> = (0..23)
            .map(|i| product(i, &format!("item-{:02}", (i * 7) % 23), i % 5))
            .collect();
        let full = QueryEngine::list(
            &QuerySpec {
                page_size: 100,
                ..QuerySpec::default()
            },
            products.clone(),
        );

        let page_size = 4;
        let pages = full.total_items.div_ceil(page_size);
        let mut stitched = Vec::new();
        for page_number in 1..=pages {
            let spec = QuerySpec {
                page_number: page_number as u32,
                page_size: page_size as u32,
                ..QuerySpec::default()
            };
            stitched.extend(QueryEngine::list(&spec, products.clone()).products);
        }
        assert_eq!(stitched, full.products);
    }

    #[test]
    fn page_past_end_is_empty_with_total() {
        let spec = QuerySpec {
            page_number: 3,
            page_size: 2,
            ..QuerySpec::default()
        };
        let result = QueryEngine::list(&spec, seeded());
        assert!(result.products.is_empty());
        assert_eq!(result.total_items, 3);
    }

    #[test]
    fn zero_page_size_yields_empty_page() {
        let spec = QuerySpec {
            page_size: 0,
            ..QuerySpec::default()
        };
        let result = QueryEngine::list(&spec, seeded());
        assert!(result.products.is_empty());
        assert_eq!(result.total_items, 3);
    }

    #[test]
    fn empty_collection_is_empty_page() {
        let result = QueryEngine::list(&QuerySpec::default(), Vec::new());
        assert!(result.products.is_empty());
        assert_eq!(result.total_items, 0);
    }
}
