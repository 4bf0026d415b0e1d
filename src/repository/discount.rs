use diesel::prelude::*;

use crate::{
    domain::discount::{
        Discount as DomainDiscount, DiscountListQuery, NewDiscount as DomainNewDiscount,
        UpdateDiscount as DomainUpdateDiscount,
    },
    models::discount::{
        Discount as DbDiscount, NewDiscount as DbNewDiscount, NewProductDiscount,
        UpdateDiscount as DbUpdateDiscount,
    },
    repository::{
        DieselRepository, DiscountReader, DiscountWriter, RepositoryError, RepositoryResult,
    },
};

impl DiscountReader for DieselRepository {
    fn get_discount_by_id(&self, id: i32) -> RepositoryResult<Option<DomainDiscount>> {
        use crate::schema::discounts;

        let mut conn = self.conn()?;
        let discount = discounts::table
            .filter(discounts::id.eq(id))
            .first::<DbDiscount>(&mut conn)
            .optional()?;

        Ok(discount.map(Into::into))
    }

    fn list_discounts(
        &self,
        query: DiscountListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainDiscount>)> {
        use crate::schema::discounts;

        let mut conn = self.conn()?;

        let mut count_query = discounts::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                discounts::name
                    .like(pattern.clone())
                    .or(discounts::description.like(pattern)),
            );
        }

        if let Some(now) = query.active_at {
            count_query = count_query
                .filter(discounts::is_enabled.eq(true))
                .filter(discounts::starts_at.le(now))
                .filter(discounts::ends_at.ge(now));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = discounts::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                discounts::name
                    .like(pattern.clone())
                    .or(discounts::description.like(pattern)),
            );
        }

        if let Some(now) = query.active_at {
            items = items
                .filter(discounts::is_enabled.eq(true))
                .filter(discounts::starts_at.le(now))
                .filter(discounts::ends_at.ge(now));
        }

        items = items.order(discounts::created_at.desc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_discounts = items.load::<DbDiscount>(&mut conn)?;

        Ok((total, db_discounts.into_iter().map(Into::into).collect()))
    }

    fn list_discount_product_ids(&self, discount_id: i32) -> RepositoryResult<Vec<i32>> {
        use crate::schema::product_discounts;

        let mut conn = self.conn()?;
        let ids = product_discounts::table
            .filter(product_discounts::discount_id.eq(discount_id))
            .order(product_discounts::id.asc())
            .select(product_discounts::product_id)
            .load::<i32>(&mut conn)?;

        Ok(ids)
    }
}

impl DiscountWriter for DieselRepository {
    fn create_discount(&self, new_discount: &DomainNewDiscount) -> RepositoryResult<DomainDiscount> {
        use crate::schema::discounts;

        let mut conn = self.conn()?;
        let db_new = DbNewDiscount::from(new_discount);

        let created = diesel::insert_into(discounts::table)
            .values(&db_new)
            .get_result::<DbDiscount>(&mut conn)?;

        Ok(created.into())
    }

    fn update_discount(
        &self,
        discount_id: i32,
        updates: &DomainUpdateDiscount,
    ) -> RepositoryResult<DomainDiscount> {
        use crate::schema::discounts;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateDiscount::from(updates);

        let updated = diesel::update(discounts::table.filter(discounts::id.eq(discount_id)))
            .set(&db_updates)
            .get_result::<DbDiscount>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_discount(&self, discount_id: i32) -> RepositoryResult<()> {
        use crate::schema::{discounts, product_discounts};

        let mut conn = self.conn()?;

        diesel::delete(
            product_discounts::table.filter(product_discounts::discount_id.eq(discount_id)),
        )
        .execute(&mut conn)?;

        let deleted = diesel::delete(discounts::table.filter(discounts::id.eq(discount_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn replace_discount_products(
        &self,
        discount_id: i32,
        product_ids: &[i32],
    ) -> RepositoryResult<()> {
        use crate::schema::{discounts, product_discounts};

        let mut conn = self.conn()?;

        let exists = discounts::table
            .filter(discounts::id.eq(discount_id))
            .count()
            .get_result::<i64>(&mut conn)?;
        if exists == 0 {
            return Err(RepositoryError::NotFound);
        }

        diesel::delete(
            product_discounts::table.filter(product_discounts::discount_id.eq(discount_id)),
        )
        .execute(&mut conn)?;

        if product_ids.is_empty() {
            return Ok(());
        }

        let links: Vec<NewProductDiscount> = product_ids
            .iter()
            .map(|product_id| NewProductDiscount {
                product_id: *product_id,
                discount_id,
            })
            .collect();

        diesel::insert_into(product_discounts::table)
            .values(&links)
            .execute(&mut conn)?;

        Ok(())
    }
}
