//! SQL DDL for initializing the catalog storage.

/// SQLite schema with:
/// - `categories`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `name`
/// - `products`: `price` kept as canonical decimal text so no precision is lost
///   to REAL; `category_id` references `categories(id)` without cascade
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price TEXT NOT NULL, -- decimal string, e.g. "699" or "19.99"
    category_id INTEGER NOT NULL REFERENCES categories(id)
);

CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id);
"#;
