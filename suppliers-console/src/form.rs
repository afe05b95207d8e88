//! The supplier form: field state plus the six actions that drive the API.

use std::fmt;
use std::str::FromStr;

use suppliers_core::{Supplier, SupplierPayload, SupplierQuery};
use tracing::info;

use crate::api::{ApiError, SupplierApi};
use crate::table;

pub const FLASH_SUCCESS: &str = "Success";
pub const FLASH_DELETED: &str = "Supplier has been deleted!";
pub const FLASH_SERVER_ERROR: &str = "Server error!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Name,
    Category,
    Available,
    Status,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(FormField::Id),
            "name" => Ok(FormField::Name),
            "category" => Ok(FormField::Category),
            "available" => Ok(FormField::Available),
            "status" => Ok(FormField::Status),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Text fields as the user typed them. `available` holds `"true"`,
/// `"false"` or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub available: String,
    pub status: String,
    pub flash: String,
    pub results: Vec<Supplier>,
}

impl SupplierForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Id => self.id = value,
            FormField::Name => self.name = value,
            FormField::Category => self.category = value,
            FormField::Available => self.available = value,
            FormField::Status => self.status = value,
        }
    }

    pub fn payload(&self) -> SupplierPayload {
        SupplierPayload {
            name: self.name.clone(),
            category: self.category.clone(),
            available: self.available == "true",
            status: Some(self.status.clone()).filter(|s| !s.is_empty()),
        }
    }

    /// Availability only filters when the field reads `"true"`.
    pub fn search_query(&self) -> SupplierQuery {
        SupplierQuery {
            name: Some(self.name.clone()),
            category: Some(self.category.clone()),
            available: (self.available == "true").then_some(true),
            status: Some(self.status.clone()),
        }
        .normalized()
    }

    /// Copies a server response into the form fields.
    pub fn fill(&mut self, supplier: &Supplier) {
        self.id = supplier.id.map(|id| id.to_string()).unwrap_or_default();
        self.name = supplier.name.clone();
        self.category = supplier.category.clone();
        self.available = supplier.available.to_string();
        self.status = supplier.status.clone();
    }

    /// Empties the data fields. The id field is left alone.
    pub fn clear_data(&mut self) {
        self.name.clear();
        self.category.clear();
        self.available.clear();
        self.status.clear();
    }

    pub fn clear(&mut self) {
        self.id.clear();
        self.flash.clear();
        self.clear_data();
    }

    pub async fn create(&mut self, api: &dyn SupplierApi) -> Result<(), ApiError> {
        self.flash.clear();
        match api.create(&self.payload()).await {
            Ok(supplier) => {
                info!("Created {}", supplier);
                self.fill(&supplier);
                self.flash = FLASH_SUCCESS.to_string();
                Ok(())
            }
            Err(err) => {
                self.flash = err.display_message();
                Err(err)
            }
        }
    }

    pub async fn update(&mut self, api: &dyn SupplierApi) -> Result<(), ApiError> {
        self.flash.clear();
        match api.update(&self.id, &self.payload()).await {
            Ok(supplier) => {
                info!("Updated {}", supplier);
                self.fill(&supplier);
                self.flash = FLASH_SUCCESS.to_string();
                Ok(())
            }
            Err(err) => {
                self.flash = err.display_message();
                Err(err)
            }
        }
    }

    pub async fn retrieve(&mut self, api: &dyn SupplierApi) -> Result<(), ApiError> {
        self.flash.clear();
        match api.retrieve(&self.id).await {
            Ok(supplier) => {
                self.fill(&supplier);
                self.flash = FLASH_SUCCESS.to_string();
                Ok(())
            }
            Err(err) => {
                self.clear_data();
                self.flash = err.display_message();
                Err(err)
            }
        }
    }

    /// A failed delete never shows the server's text.
    pub async fn delete(&mut self, api: &dyn SupplierApi) -> Result<(), ApiError> {
        self.flash.clear();
        match api.delete(&self.id).await {
            Ok(()) => {
                info!("Deleted supplier {}", self.id);
                self.clear_data();
                self.flash = FLASH_DELETED.to_string();
                Ok(())
            }
            Err(err) => {
                self.flash = FLASH_SERVER_ERROR.to_string();
                Err(err)
            }
        }
    }

    pub async fn search(&mut self, api: &dyn SupplierApi) -> Result<(), ApiError> {
        self.flash.clear();
        match api.search(&self.search_query()).await {
            Ok(suppliers) => {
                info!("Search returned {} suppliers", suppliers.len());
                if let Some(first) = suppliers.first() {
                    self.fill(first);
                }
                self.results = suppliers;
                self.flash = FLASH_SUCCESS.to_string();
                Ok(())
            }
            Err(err) => {
                self.clear_data();
                self.flash = err.display_message();
                Err(err)
            }
        }
    }
}

impl fmt::Display for SupplierForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID:        {}", self.id)?;
        writeln!(f, "Name:      {}", self.name)?;
        writeln!(f, "Category:  {}", self.category)?;
        writeln!(f, "Available: {}", self.available)?;
        writeln!(f, "Status:    {}", self.status)?;
        if !self.flash.is_empty() {
            writeln!(f, "[{}]", self.flash)?;
        }
        if !self.results.is_empty() {
            write!(f, "{}", table::render(&self.results))?;
        }
        Ok(())
    }
}
