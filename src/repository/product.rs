use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::discount::Discount as DomainDiscount,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::discount::Discount as DbDiscount,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        if let Some(db_product) = product {
            let mut domain: DomainProduct = db_product.into();
            let mut discounts = load_discounts_for_products(&mut conn, &[domain.id])?;
            domain.discounts = discounts.remove(&domain.id).unwrap_or_default();
            Ok(Some(domain))
        } else {
            Ok(None)
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::{discounts, product_discounts, products};

        let mut conn = self.conn()?;

        // Subquery for the push-down discount filter; built per use because
        // the two boxed queries each consume one.
        let discounted_product_ids = |now: chrono::NaiveDateTime| {
            product_discounts::table
                .inner_join(discounts::table)
                .filter(discounts::is_enabled.eq(true))
                .filter(discounts::starts_at.le(now))
                .filter(discounts::ends_at.ge(now))
                .select(product_discounts::product_id)
        };

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_archived {
            count_query = count_query.filter(products::is_archived.eq(false));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        if let Some(sku) = query.sku.as_ref() {
            count_query = count_query.filter(products::sku.eq(sku));
        }

        if let Some(now) = query.discounted_at {
            count_query = count_query.filter(products::id.eq_any(discounted_product_ids(now)));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_archived {
            items = items.filter(products::is_archived.eq(false));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        if let Some(sku) = query.sku.as_ref() {
            items = items.filter(products::sku.eq(sku));
        }

        if let Some(now) = query.discounted_at {
            items = items.filter(products::id.eq_any(discounted_product_ids(now)));
        }

        items = items.order((products::is_archived.asc(), products::created_at.desc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut discount_map = load_discounts_for_products(&mut conn, &product_ids)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let mut domain: DomainProduct = db_product.into();
            domain.discounts = discount_map.remove(&domain.id).unwrap_or_default();
            domain_products.push(domain);
        }

        Ok((total, domain_products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        let mut domain: DomainProduct = updated.into();
        let mut discounts = load_discounts_for_products(&mut conn, &[domain.id])?;
        domain.discounts = discounts.remove(&domain.id).unwrap_or_default();

        Ok(domain)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_discounts, products};

        let mut conn = self.conn()?;

        diesel::delete(
            product_discounts::table.filter(product_discounts::product_id.eq(product_id)),
        )
        .execute(&mut conn)?;

        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Load the linked discounts for a set of products, keyed by product id.
///
/// Rows come back in link order (oldest link first); this order is what the
/// pricing resolver's first-seen-wins tie-break runs over.
fn load_discounts_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainDiscount>>> {
    use crate::schema::{discounts, product_discounts};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_discounts::table
        .inner_join(discounts::table)
        .filter(product_discounts::product_id.eq_any(product_ids))
        .order((
            product_discounts::created_at.asc(),
            product_discounts::id.asc(),
        ))
        .select((product_discounts::product_id, DbDiscount::as_select()))
        .load::<(i32, DbDiscount)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainDiscount>> = HashMap::new();
    for (product_id, discount) in rows {
        map.entry(product_id).or_default().push(discount.into());
    }

    Ok(map)
}
