//! Countries service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::countries::{
        errors::CountriesServiceError,
        models::{Country, CountryUpdate, CountryUuid, NewCountry},
        repository::PgCountriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCountriesService {
    db: Db,
    repository: PgCountriesRepository,
}

impl PgCountriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCountriesRepository::new(),
        }
    }
}

#[async_trait]
impl CountriesService for PgCountriesService {
    async fn list_countries(&self) -> Result<Vec<Country>, CountriesServiceError> {
        let mut tx = self.db.begin().await?;

        let countries = self.repository.list_countries(&mut tx).await?;

        tx.commit().await?;

        Ok(countries)
    }

    async fn get_country(&self, country: CountryUuid) -> Result<Country, CountriesServiceError> {
        let mut tx = self.db.begin().await?;

        let country = self.repository.get_country(&mut tx, country).await?;

        tx.commit().await?;

        Ok(country)
    }

    async fn create_country(&self, country: NewCountry) -> Result<Country, CountriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_country(&mut tx, &country).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_country(
        &self,
        country: CountryUuid,
        update: CountryUpdate,
    ) -> Result<Country, CountriesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_country(&mut tx, country, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_country(&self, country: CountryUuid) -> Result<(), CountriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_country(&mut tx, country).await?;

        if rows_affected == 0 {
            return Err(CountriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CountriesService: Send + Sync {
    /// Retrieves all countries.
    async fn list_countries(&self) -> Result<Vec<Country>, CountriesServiceError>;

    /// Retrieve a single country.
    async fn get_country(&self, country: CountryUuid) -> Result<Country, CountriesServiceError>;

    /// Creates a new country.
    async fn create_country(&self, country: NewCountry) -> Result<Country, CountriesServiceError>;

    /// Updates a country with the given UUID.
    async fn update_country(
        &self,
        country: CountryUuid,
        update: CountryUpdate,
    ) -> Result<Country, CountriesServiceError>;

    /// Deletes a country with the given UUID.
    async fn delete_country(&self, country: CountryUuid) -> Result<(), CountriesServiceError>;
}
