//! Repository implementation for companies.

use chrono::Utc;
use diesel::{Connection, prelude::*};
use uuid::Uuid;

use crate::{
    domain::company::{Company, NewCompany, UpdateCompany},
    models::company::{
        Company as DbCompany, NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany,
    },
    repository::{
        CompanyReader, CompanyWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_company = companies::table
            .find(id.to_string())
            .first::<DbCompany>(&mut conn)
            .optional()?;

        match db_company {
            Some(db_company) => Ok(Some(
                Company::try_from(db_company).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_companies(&self) -> RepositoryResult<Vec<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        companies::table
            .order(companies::name.asc())
            .load::<DbCompany>(&mut conn)?
            .into_iter()
            .map(|c| Company::try_from(c).map_err(RepositoryError::from))
            .collect()
    }

    fn get_companies_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let id_strings: Vec<String> = ids.iter().map(Uuid::to_string).collect();

        companies::table
            .filter(companies::id.eq_any(&id_strings))
            .order(companies::name.asc())
            .load::<DbCompany>(&mut conn)?
            .into_iter()
            .map(|c| Company::try_from(c).map_err(RepositoryError::from))
            .collect()
    }
}

impl CompanyWriter for DieselRepository {
    fn create_companies(&self, new_companies: &[NewCompany]) -> RepositoryResult<Vec<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewCompany> = new_companies.iter().map(Into::into).collect();

        conn.transaction::<Vec<Company>, RepositoryError, _>(|conn| {
            insertables
                .iter()
                .map(|insertable| {
                    let created = diesel::insert_into(companies::table)
                        .values(insertable)
                        .get_result::<DbCompany>(conn)?;
                    Company::try_from(created).map_err(RepositoryError::from)
                })
                .collect()
        })
    }

    fn update_company(&self, id: Uuid, updates: &UpdateCompany) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let id_string = id.to_string();

        let db_updates = DbUpdateCompany {
            name: updates.name.as_str(),
            address: updates.address.as_str(),
            country: updates.country.as_str(),
            version: updates.expected_version + 1,
            updated_at: Utc::now().naive_utc(),
        };

        conn.transaction::<Company, RepositoryError, _>(|conn| {
            let updated = diesel::update(
                companies::table
                    .find(&id_string)
                    .filter(companies::version.eq(updates.expected_version)),
            )
            .set(&db_updates)
            .get_result::<DbCompany>(conn)
            .optional()?;

            match updated {
                Some(db_company) => Company::try_from(db_company).map_err(RepositoryError::from),
                None => {
                    // Either the row is gone or the caller holds a stale version.
                    let found = companies::table
                        .find(&id_string)
                        .select(companies::version)
                        .first::<i32>(conn)
                        .optional()?;

                    match found {
                        Some(found) => Err(RepositoryError::VersionConflict {
                            expected: updates.expected_version,
                            found,
                        }),
                        None => Err(RepositoryError::NotFound),
                    }
                }
            }
        })
    }

    fn delete_company(&self, id: Uuid) -> RepositoryResult<usize> {
        use crate::schema::{companies, employees};

        let mut conn = self.conn()?;
        let id_string = id.to_string();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            diesel::delete(employees::table.filter(employees::company_id.eq(&id_string)))
                .execute(conn)?;
            let deleted =
                diesel::delete(companies::table.find(&id_string)).execute(conn)?;
            Ok(deleted)
        })
    }
}
