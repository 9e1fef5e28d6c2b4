//! Standalone inventory storage
//!
//! When no database is configured the server runs in demo mode: the car
//! catalog lives in process memory, seeded with sample listings, and is
//! written through the [`InventoryPersistence`] boundary after every
//! mutation. The JSON-file implementation gives restarts the same
//! last-writer-wins durability the original storefront kept in browser
//! storage; the in-memory implementation backs tests.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{
    check_transition, BodyStyle, Car, CarInput, CreateInquiryRequest, FuelType, Inquiry,
    InquiryStatus, Transmission,
};

/// Car record in the demo inventory; ids are locally incremented integers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCar {
    pub id: u64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub body: BodyStyle,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<InventoryCar> for Car {
    fn from(car: InventoryCar) -> Self {
        Self {
            id: car.id.to_string(),
            make: car.make,
            model: car.model,
            year: car.year,
            price: car.price,
            mileage: car.mileage,
            fuel: car.fuel,
            transmission: car.transmission,
            body: car.body,
            color: car.color,
            description: car.description,
            images: car.images,
            features: car.features,
            featured: car.featured,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

/// Load/save boundary for the demo inventory
///
/// Kept behind a trait so the storage medium can change without touching
/// the store's consumers.
pub trait InventoryPersistence: Send + Sync {
    /// Returns `None` when nothing has been persisted yet
    fn load(&self) -> Result<Option<Vec<InventoryCar>>, AppError>;

    fn save(&self, cars: &[InventoryCar]) -> Result<(), AppError>;
}

/// JSON file persistence, one array of cars per file
pub struct JsonFileInventory {
    path: PathBuf,
}

impl JsonFileInventory {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl InventoryPersistence for JsonFileInventory {
    fn load(&self) -> Result<Option<Vec<InventoryCar>>, AppError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Failed to read inventory file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let cars = serde_json::from_str(&raw).map_err(|e| {
            AppError::Internal(format!(
                "Inventory file {} is not valid JSON: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(cars))
    }

    fn save(&self, cars: &[InventoryCar]) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(cars)
            .map_err(|e| AppError::Internal(format!("Failed to serialize inventory: {}", e)))?;
        std::fs::write(&self.path, raw).map_err(|e| {
            AppError::Internal(format!(
                "Failed to write inventory file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// In-memory persistence for tests
#[derive(Default)]
pub struct MemoryInventory {
    cars: Mutex<Option<Vec<InventoryCar>>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryPersistence for MemoryInventory {
    fn load(&self) -> Result<Option<Vec<InventoryCar>>, AppError> {
        match self.cars.lock() {
            Ok(guard) => Ok(guard.clone()),
            Err(_) => Err(AppError::Internal("Inventory lock poisoned".to_string())),
        }
    }

    fn save(&self, cars: &[InventoryCar]) -> Result<(), AppError> {
        match self.cars.lock() {
            Ok(mut guard) => {
                *guard = Some(cars.to_vec());
                Ok(())
            }
            Err(_) => Err(AppError::Internal("Inventory lock poisoned".to_string())),
        }
    }
}

/// Thread-safe demo-mode car store
pub struct InventoryStore {
    persistence: Box<dyn InventoryPersistence>,
    cars: RwLock<Vec<InventoryCar>>,
}

impl InventoryStore {
    /// Load persisted inventory, seeding sample listings on first run
    pub fn open(persistence: Box<dyn InventoryPersistence>) -> Result<Self, AppError> {
        let cars = match persistence.load()? {
            Some(cars) => {
                info!("Loaded {} cars from persisted inventory", cars.len());
                cars
            }
            None => {
                let seeded = seed_inventory();
                persistence.save(&seeded)?;
                info!("Seeded demo inventory with {} sample cars", seeded.len());
                seeded
            }
        };

        Ok(Self {
            persistence,
            cars: RwLock::new(cars),
        })
    }

    pub async fn list(&self) -> Vec<Car> {
        let cars = self.cars.read().await;
        cars.iter().cloned().map(Car::from).collect()
    }

    pub async fn get(&self, id: u64) -> Result<Car, AppError> {
        let cars = self.cars.read().await;
        cars.iter()
            .find(|car| car.id == id)
            .cloned()
            .map(Car::from)
            .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))
    }

    pub async fn create(&self, input: CarInput) -> Result<Car, AppError> {
        let mut cars = self.cars.write().await;
        let id = cars.iter().map(|car| car.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let document = input.into_document(now);

        let car = InventoryCar {
            id,
            make: document.make,
            model: document.model,
            year: document.year,
            price: document.price,
            mileage: document.mileage,
            fuel: document.fuel,
            transmission: document.transmission,
            body: document.body,
            color: document.color,
            description: document.description,
            images: document.images,
            features: document.features,
            featured: document.featured,
            created_at: document.created_at,
            updated_at: document.updated_at,
        };
        cars.push(car.clone());
        self.persistence.save(&cars)?;

        debug!("Car {} added to demo inventory", id);
        Ok(Car::from(car))
    }

    /// Full replace of editable fields, keeping id and creation time
    pub async fn replace(&self, id: u64, input: CarInput) -> Result<Car, AppError> {
        let mut cars = self.cars.write().await;
        let car = cars
            .iter_mut()
            .find(|car| car.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))?;

        let now = Utc::now();
        car.make = input.make;
        car.model = input.model;
        car.year = input.year;
        car.price = input.price;
        car.mileage = input.mileage;
        car.fuel = input.fuel;
        car.transmission = input.transmission;
        car.body = input.body;
        car.color = input.color;
        car.description = input.description;
        car.images = input.images;
        car.features = input.features;
        car.featured = input.featured;
        car.updated_at = now;

        let updated = car.clone();
        self.persistence.save(&cars)?;

        debug!("Car {} replaced in demo inventory", id);
        Ok(Car::from(updated))
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let mut cars = self.cars.write().await;
        let before = cars.len();
        cars.retain(|car| car.id != id);
        if cars.len() == before {
            return Err(AppError::NotFound(format!("Car {} not found", id)));
        }
        self.persistence.save(&cars)?;

        debug!("Car {} removed from demo inventory", id);
        Ok(())
    }

    /// Flip the promotional flag on a listing
    pub async fn toggle_featured(&self, id: u64) -> Result<Car, AppError> {
        let mut cars = self.cars.write().await;
        let car = cars
            .iter_mut()
            .find(|car| car.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))?;

        car.featured = !car.featured;
        car.updated_at = Utc::now();

        let updated = car.clone();
        self.persistence.save(&cars)?;
        Ok(Car::from(updated))
    }
}

/// In-process inquiry log for demo mode (not persisted)
#[derive(Default)]
pub struct LocalInquiryStore {
    inner: RwLock<LocalInquiries>,
}

#[derive(Default)]
struct LocalInquiries {
    entries: Vec<Inquiry>,
    next_id: u64,
}

impl LocalInquiryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, request: CreateInquiryRequest) -> Inquiry {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let document = request.into_document(Utc::now());
        let inquiry = Inquiry {
            id: inner.next_id.to_string(),
            name: document.name,
            email: document.email,
            phone: document.phone,
            message: document.message,
            car: document.car,
            status: document.status,
            created_at: document.created_at,
            updated_at: document.updated_at,
        };
        inner.entries.push(inquiry.clone());
        inquiry
    }

    /// Newest first, matching the database-backed ordering
    pub async fn list(&self) -> Vec<Inquiry> {
        let inner = self.inner.read().await;
        inner.entries.iter().rev().cloned().collect()
    }

    pub async fn update_status(&self, id: u64, status: InquiryStatus) -> Result<Inquiry, AppError> {
        let mut inner = self.inner.write().await;
        let id = id.to_string();
        let inquiry = inner
            .entries
            .iter_mut()
            .find(|inquiry| inquiry.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))?;

        check_transition(inquiry.status, status)?;
        inquiry.status = status;
        inquiry.updated_at = Utc::now();
        Ok(inquiry.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let id = id.to_string();
        let before = inner.entries.len();
        inner.entries.retain(|inquiry| inquiry.id != id);
        if inner.entries.len() == before {
            return Err(AppError::NotFound(format!("Inquiry {} not found", id)));
        }
        Ok(())
    }
}

/// Parse a path identifier into a demo-mode integer id
pub fn parse_local_id(id: &str) -> Result<u64, AppError> {
    id.parse::<u64>()
        .map_err(|_| AppError::MalformedId(format!("'{}' is not a valid identifier", id)))
}

/// Sample listings shown before anyone adds their own
fn seed_inventory() -> Vec<InventoryCar> {
    let now = Utc::now();
    let car = |id: u64,
               make: &str,
               model: &str,
               year: i32,
               price: f64,
               mileage: u32,
               fuel: FuelType,
               body: BodyStyle,
               color: &str,
               description: &str,
               image: &str| InventoryCar {
        id,
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fuel,
        transmission: Transmission::Automatic,
        body,
        color: color.to_string(),
        description: description.to_string(),
        images: vec![image.to_string()],
        features: Vec::new(),
        featured: false,
        created_at: now,
        updated_at: now,
    };

    vec![
        car(
            1,
            "Mercedes-Benz",
            "S-Class",
            2023,
            109_900.0,
            12_000,
            FuelType::Hybrid,
            BodyStyle::Sedan,
            "Obsidian Black",
            "Luxury redefined. Cutting-edge driver assistance and a premium \
             interior offer an unparalleled driving experience.",
            "https://images.unsplash.com/photo-1542362567-b07e54358753",
        ),
        car(
            2,
            "Porsche",
            "911 Carrera",
            2022,
            125_500.0,
            8_000,
            FuelType::Gasoline,
            BodyStyle::Coupe,
            "Guards Red",
            "Exhilarating performance from the turbocharged flat-six. \
             Precision handling and timeless design.",
            "https://images.unsplash.com/photo-1503376780353-7e6692767b70",
        ),
        car(
            3,
            "Land Rover",
            "Range Rover Sport",
            2021,
            89_900.0,
            22_000,
            FuelType::Diesel,
            BodyStyle::Suv,
            "Santorini Black",
            "Rugged capability with refined luxury. Advanced terrain response \
             for confidence in any driving condition.",
            "https://images.unsplash.com/photo-1553440569-bcc63803a83d",
        ),
    ]
}
