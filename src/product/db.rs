//! Database operations for products.

use rusqlite::{Connection, Row};

use crate::{
    Error, FieldErrors,
    category::CategoryId,
    product::{NewProduct, Product, ProductId},
};

/// Create a product and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::Validation] on the `category` field if the category does not exist.
pub fn create_product(product: NewProduct, connection: &Connection) -> Result<Product, Error> {
    connection
        .execute(
            "INSERT INTO product (category_id, title, description, slug, regular_price, discount_price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            (
                product.category,
                &product.title,
                &product.description,
                &product.slug,
                product.regular_price,
                product.discount_price,
            ),
        )
        .map_err(|error| map_category_error(error.into(), product.category))?;

    let id = connection.last_insert_rowid();

    Ok(with_id(id, product))
}

/// Retrieve a single product by ID.
pub fn get_product(product_id: ProductId, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare(
            "SELECT id, category_id, title, description, slug, regular_price, discount_price
            FROM product WHERE id = :id;",
        )?
        .query_row(&[(":id", &product_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all products in the order they were created.
pub fn get_all_products(connection: &Connection) -> Result<Vec<Product>, Error> {
    connection
        .prepare(
            "SELECT id, category_id, title, description, slug, regular_price, discount_price
            FROM product ORDER BY id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Overwrite a product's fields. Returns [Error::NotFound] if the product doesn't exist.
pub fn update_product(
    product_id: ProductId,
    product: NewProduct,
    connection: &Connection,
) -> Result<Product, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE product
            SET category_id = ?1, title = ?2, description = ?3, slug = ?4,
                regular_price = ?5, discount_price = ?6
            WHERE id = ?7",
            (
                product.category,
                &product.title,
                &product.description,
                &product.slug,
                product.regular_price,
                product.discount_price,
                product_id,
            ),
        )
        .map_err(|error| map_category_error(error.into(), product.category))?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(with_id(product_id, product))
}

/// Delete a product by ID. Returns [Error::NotFound] if the product doesn't exist.
pub fn delete_product(product_id: ProductId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM product WHERE id = ?1", [product_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the product table and indexes.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            category_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            slug TEXT NOT NULL,
            regular_price REAL NOT NULL,
            discount_price REAL NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_product_category ON product(category_id);",
    )?;

    Ok(())
}

fn map_category_error(error: Error, category_id: CategoryId) -> Error {
    match error {
        Error::ForeignKeyViolation => Error::Validation(FieldErrors::single(
            "category",
            format!("Invalid pk \"{category_id}\" - object does not exist."),
        )),
        error => error,
    }
}

fn with_id(id: ProductId, product: NewProduct) -> Product {
    Product {
        id,
        category: product.category,
        title: product.title,
        description: product.description,
        slug: product.slug,
        regular_price: product.regular_price,
        discount_price: product.discount_price,
    }
}

fn map_row(row: &Row) -> Result<Product, rusqlite::Error> {
    Ok(Product {
        id: row.get(0)?,
        category: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        slug: row.get(4)?,
        regular_price: row.get(5)?,
        discount_price: row.get(6)?,
    })
}
