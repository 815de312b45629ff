use crate::api::{RestResource, UpdateMethod};
use crate::clients::{
    ActorClient, CustomerClient, EquipmentClient, OrderClient, StockClient, TechnicianClient,
};
use crate::config::{ApiSettings, Settings};
use crate::directory::Directory;
use crate::error::ConsoleError;
use crate::geocoding::{Geocoder, MapPlan, NominatimProvider, SitePin};
use crate::model::{Customer, Equipment, ServiceOrder, StockItem, Technician};
use crate::notify::Notifier;
use crate::order_actor::OrderContext;
use actor_framework::{Reporter, SharedRemote};
use std::sync::Arc;
use tokio::task::JoinHandle;
use futures::StreamExt;
use tracing::{error, info, warn};

/// The remote collection behind each store.
pub struct Remotes {
    pub customers: SharedRemote<Customer>,
    pub equipment: SharedRemote<Equipment>,
    pub technicians: SharedRemote<Technician>,
    pub stock: SharedRemote<StockItem>,
    pub orders: SharedRemote<ServiceOrder>,
}

impl Remotes {
    /// REST endpoints under `api.base_url`, sharing one HTTP client.
    pub fn http(client: reqwest::Client, api: &ApiSettings) -> Self {
        let base = api.base_url.as_str();
        Self {
            customers: Arc::new(RestResource::<Customer>::new(
                client.clone(),
                base,
                "/customers",
                UpdateMethod::Put,
            )),
            equipment: Arc::new(RestResource::<Equipment>::new(
                client.clone(),
                base,
                "/equipments",
                UpdateMethod::Put,
            )),
            technicians: Arc::new(RestResource::<Technician>::new(
                client.clone(),
                base,
                "/technicians",
                UpdateMethod::Put,
            )),
            stock: Arc::new(RestResource::<StockItem>::new(
                client.clone(),
                base,
                "/stock/items",
                UpdateMethod::Put,
            )),
            orders: Arc::new(RestResource::<ServiceOrder>::new(
                client,
                base,
                "/service-orders",
                UpdateMethod::Patch,
            )),
        }
    }
}

/// One running console: every store actor, wired together, plus the geocoder and the
/// notification channel they report to.
///
/// Dependencies run one way, equipment → orders → stock, so dropping the clients held here
/// stops the actors in that order.
pub struct ConsoleSystem {
    pub customer_client: CustomerClient,
    pub equipment_client: EquipmentClient,
    pub technician_client: TechnicianClient,
    pub stock_client: StockClient,
    pub order_client: OrderClient,
    pub notifier: Arc<Notifier>,
    pub geocoder: Arc<Geocoder>,
    handles: Vec<JoinHandle<()>>,
}

impl ConsoleSystem {
    /// Spawns the store actors over `remotes`.
    pub fn new(settings: &Settings, remotes: Remotes, geocoder: Arc<Geocoder>) -> Self {
        let buffer = settings.actors.buffer_size;
        let notifier = Arc::new(Notifier::new(
            settings.notifications.dismiss_after(),
            settings.notifications.capacity,
        ));
        let reporter: Arc<dyn Reporter> = notifier.clone();

        // 1. Create actors
        let (customer_actor, customer_client) =
            crate::customer_actor::new(buffer, remotes.customers);
        let (technician_actor, technician_client) =
            crate::technician_actor::new(buffer, remotes.technicians);
        let (stock_actor, stock_client) = crate::stock_actor::new(buffer, remotes.stock);
        let (order_actor, order_client) = crate::order_actor::new(buffer, remotes.orders);
        let (equipment_actor, equipment_client) =
            crate::equipment_actor::new(buffer, remotes.equipment);

        // 2. Start them with their context
        let handles = vec![
            tokio::spawn(customer_actor.with_reporter(reporter.clone()).run(())),
            tokio::spawn(technician_actor.with_reporter(reporter.clone()).run(())),
            tokio::spawn(stock_actor.with_reporter(reporter.clone()).run(())),
            tokio::spawn(
                order_actor
                    .with_reporter(reporter.clone())
                    .run(OrderContext::new(stock_client.clone(), &settings.operator)),
            ),
            tokio::spawn(
                equipment_actor
                    .with_reporter(reporter)
                    .run(order_client.clone()),
            ),
        ];
        info!(operator = %settings.operator, "Console started");

        Self {
            customer_client,
            equipment_client,
            technician_client,
            stock_client,
            order_client,
            notifier,
            geocoder,
            handles,
        }
    }

    /// Console against the configured REST API and the Nominatim geocoder.
    pub fn connect(settings: &Settings) -> Result<Self, reqwest::Error> {
        let api = reqwest::Client::builder()
            .timeout(settings.api.timeout())
            .build()?;
        let remotes = Remotes::http(api.clone(), &settings.api);
        let provider = NominatimProvider::new(api, &settings.geocoding);
        let geocoder = Arc::new(Geocoder::new(
            Arc::new(provider),
            settings.geocoding.delay(),
        ));
        Ok(Self::new(settings, remotes, geocoder))
    }

    /// Loads every store from its remote. Stops at the first store that fails; the stores
    /// already loaded keep their lists.
    pub async fn load_all(&self) -> Result<(), ConsoleError> {
        self.customer_client.load().await?;
        self.equipment_client.load().await?;
        self.technician_client.load().await?;
        self.stock_client.load().await?;
        self.order_client.load().await?;
        Ok(())
    }

    /// Name lookups over the current customer, equipment and technician lists.
    pub async fn directory(&self) -> Result<Directory, ConsoleError> {
        Ok(Directory::new(
            self.customer_client.list().await?,
            self.equipment_client.list().await?,
            self.technician_client.list().await?,
        ))
    }

    /// Places every customer on the map, geocoding the ones without coordinates.
    ///
    /// Coordinates found are written back to the customer so later runs skip the lookup.
    /// Returns the pins and the customers whose address could not be resolved.
    pub async fn place_customers(&self) -> Result<(Vec<SitePin>, Vec<Customer>), ConsoleError> {
        let customers = self.customer_client.list().await?;
        let orders = self.order_client.list().await?;
        let mut plan = MapPlan::new(&customers, &orders);
        info!(
            placed = plan.placed.len(),
            pending = plan.pending.len(),
            "Geocoding customer addresses"
        );

        let results: Vec<_> = self
            .geocoder
            .geocode_all(plan.geocode_items())
            .collect()
            .await;
        for (customer, found) in plan.pending.iter().zip(&results) {
            let Some(found) = found else { continue };
            if let Err(e) = self
                .customer_client
                .set_coordinates(customer.id.clone(), found.lat, found.lng)
                .await
            {
                warn!(customer = %customer.id, error = %e, "Could not save coordinates");
            }
        }

        let unplaced = plan.place(results, &orders);
        if !unplaced.is_empty() {
            self.notifier.info(format!(
                "{} address(es) could not be located",
                unplaced.len()
            ));
        }
        Ok((plan.placed, unplaced))
    }

    /// Drops the clients and waits for every actor to stop.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down console...");
        drop(self.customer_client);
        drop(self.technician_client);
        drop(self.equipment_client);
        drop(self.order_client);
        drop(self.stock_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }
        info!("Console shutdown complete.");
        Ok(())
    }
}
