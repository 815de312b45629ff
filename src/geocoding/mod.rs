//! # Geocoding
//!
//! Turns customer addresses into map coordinates while honouring the provider's limit of
//! one request per second.
//!
//! * [`Geocoder::geocode`] answers from the cache when it can. Failed lookups are cached as
//!   "no result" too, so a bad address is only sent once.
//! * Network lookups are serialized; each one starts at least `delay` after the previous
//!   network call finished, so a slow response never shortens the gap. Cache hits never wait.
//! * [`Geocoder::geocode_all`] is a lazy stream over a batch, in input order. A failure
//!   yields `None` for that item and the stream carries on.
//!
//! ```rust,ignore
//! let geocoder = Geocoder::new(Arc::new(NominatimProvider::new(client, &settings)), delay);
//! let results: Vec<_> = geocoder.geocode_all(items).collect().await;
//! ```

pub mod nominatim;

pub use nominatim::NominatimProvider;

use crate::analytics::{site_status, SiteStatus};
use crate::model::{Customer, CustomerId, ServiceOrder};
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(String),
    #[error("Invalid geocoding response: {0}")]
    Decode(String),
}

/// A single address lookup service.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// `Ok(None)` when the address is unknown to the provider.
    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// One address to place, with the label shown on its pin.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeItem {
    pub address: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoResult {
    pub address: String,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

struct GeocoderState {
    cache: HashMap<String, Option<Coordinates>>,
    last_call: Option<Instant>,
}

/// Cached, rate-limited front for a [`GeocodeProvider`].
pub struct Geocoder {
    provider: Arc<dyn GeocodeProvider>,
    delay: Duration,
    state: Mutex<GeocoderState>,
}

impl Geocoder {
    pub fn new(provider: Arc<dyn GeocodeProvider>, delay: Duration) -> Self {
        Self {
            provider,
            delay,
            state: Mutex::new(GeocoderState {
                cache: HashMap::new(),
                last_call: None,
            }),
        }
    }

    /// Coordinates for `address`, or `None` if it could not be resolved now or earlier.
    pub async fn geocode(&self, address: &str) -> Option<Coordinates> {
        // Held across the lookup so concurrent callers queue behind the rate limit.
        let mut state = self.state.lock().await;
        if let Some(cached) = state.cache.get(address) {
            debug!(address, hit = cached.is_some(), "Geocode cache");
            return *cached;
        }

        if let Some(last) = state.last_call {
            sleep_until(last + self.delay).await;
        }

        let looked_up = self.provider.lookup(address).await;
        state.last_call = Some(Instant::now());
        let found = match looked_up {
            Ok(Some(coordinates)) => {
                info!(address, lat = coordinates.lat, lng = coordinates.lng, "Geocoded");
                Some(coordinates)
            }
            Ok(None) => {
                warn!(address, "No geocoding result");
                None
            }
            Err(e) => {
                warn!(address, error = %e, "Geocoding failed");
                None
            }
        };
        state.cache.insert(address.to_string(), found);
        found
    }

    /// Geocodes `items` one after another. Nothing is looked up until the stream is polled.
    pub fn geocode_all(
        &self,
        items: Vec<GeocodeItem>,
    ) -> impl Stream<Item = Option<GeoResult>> + '_ {
        stream::iter(items).then(move |item| async move {
            let coordinates = self.geocode(&item.address).await?;
            Some(GeoResult {
                address: item.address,
                label: item.label,
                lat: coordinates.lat,
                lng: coordinates.lng,
            })
        })
    }

    pub async fn cached(&self) -> usize {
        self.state.lock().await.cache.len()
    }
}

/// A customer placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePin {
    pub customer_id: CustomerId,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub status: SiteStatus,
}

impl SitePin {
    fn new(customer: &Customer, lat: f64, lng: f64, orders: &[ServiceOrder]) -> Self {
        Self {
            customer_id: customer.id.clone(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            lat,
            lng,
            status: site_status(orders, &customer.id),
        }
    }
}

/// Customers split into those already carrying coordinates and those still to geocode.
#[derive(Debug, Clone, Default)]
pub struct MapPlan {
    pub placed: Vec<SitePin>,
    pub pending: Vec<Customer>,
}

impl MapPlan {
    pub fn new(customers: &[Customer], orders: &[ServiceOrder]) -> Self {
        let mut plan = MapPlan::default();
        for customer in customers {
            match customer.coordinates() {
                Some((lat, lng)) => plan.placed.push(SitePin::new(customer, lat, lng, orders)),
                None => plan.pending.push(customer.clone()),
            }
        }
        plan
    }

    /// Lookups for the pending customers, in the same order as [`MapPlan::pending`].
    pub fn geocode_items(&self) -> Vec<GeocodeItem> {
        self.pending
            .iter()
            .map(|c| GeocodeItem {
                address: c.address.clone(),
                label: c.name.clone(),
            })
            .collect()
    }

    /// Pins the pending customers from `results`, which must be in [`MapPlan::geocode_items`]
    /// order. Returns the customers that could not be placed.
    pub fn place(
        &mut self,
        results: Vec<Option<GeoResult>>,
        orders: &[ServiceOrder],
    ) -> Vec<Customer> {
        let mut unplaced = Vec::new();
        for (customer, result) in std::mem::take(&mut self.pending).into_iter().zip(results) {
            match result {
                Some(found) => self
                    .placed
                    .push(SitePin::new(&customer, found.lat, found.lng, orders)),
                None => unplaced.push(customer),
            }
        }
        unplaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Records the (paused) clock at every lookup.
    #[derive(Default)]
    struct Recorder {
        calls: StdMutex<Vec<(String, Instant)>>,
        latency: Duration,
    }

    impl Recorder {
        fn calls(&self) -> Vec<(String, Instant)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GeocodeProvider for Recorder {
        async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
            self.calls
                .lock()
                .unwrap()
                .push((address.to_string(), Instant::now()));
            tokio::time::sleep(self.latency).await;
            match address {
                "nowhere" => Ok(None),
                "broken" => Err(GeocodeError::Request("timeout".into())),
                _ => Ok(Some(Coordinates {
                    lat: -23.5,
                    lng: -46.6,
                })),
            }
        }
    }

    fn item(address: &str) -> GeocodeItem {
        GeocodeItem {
            address: address.into(),
            label: format!("Site at {address}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_is_spaced_by_a_fixed_delay() {
        let recorder = Arc::new(Recorder::default());
        let geocoder = Geocoder::new(recorder.clone(), Duration::from_millis(1100));
        let start = Instant::now();

        let results: Vec<_> = geocoder
            .geocode_all(vec![item("Rua A"), item("Rua B"), item("Rua C")])
            .collect()
            .await;

        assert!(results.iter().all(Option::is_some));
        let offsets: Vec<u128> = recorder
            .calls()
            .iter()
            .map(|(_, at)| (*at - start).as_millis())
            .collect();
        assert_eq!(offsets, [0, 1100, 2200]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_counts_from_the_end_of_a_slow_lookup() {
        let recorder = Arc::new(Recorder {
            latency: Duration::from_millis(500),
            ..Default::default()
        });
        let geocoder = Geocoder::new(recorder.clone(), Duration::from_millis(1100));
        let start = Instant::now();

        let results: Vec<_> = geocoder
            .geocode_all(vec![item("Rua A"), item("Rua B")])
            .collect()
            .await;

        assert!(results.iter().all(Option::is_some));
        let offsets: Vec<u128> = recorder
            .calls()
            .iter()
            .map(|(_, at)| (*at - start).as_millis())
            .collect();
        assert_eq!(offsets, [0, 1600]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_results_are_cached() {
        let recorder = Arc::new(Recorder::default());
        let geocoder = Geocoder::new(recorder.clone(), Duration::from_millis(1100));

        assert_eq!(geocoder.geocode("nowhere").await, None);
        assert_eq!(geocoder.geocode("nowhere").await, None);
        assert_eq!(geocoder.geocode("broken").await, None);
        assert_eq!(geocoder.geocode("broken").await, None);

        assert_eq!(recorder.calls().len(), 2);
        assert_eq!(geocoder.cached().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_stop_the_batch() {
        let recorder = Arc::new(Recorder::default());
        let geocoder = Geocoder::new(recorder.clone(), Duration::from_millis(1100));

        let results: Vec<_> = geocoder
            .geocode_all(vec![item("Rua A"), item("broken"), item("Rua A"), item("Rua C")])
            .collect()
            .await;

        assert_eq!(
            results.iter().map(Option::is_some).collect::<Vec<_>>(),
            [true, false, true, true]
        );
        assert_eq!(results[0].as_ref().unwrap().label, "Site at Rua A");
        // The repeated address is served from the cache.
        assert_eq!(recorder.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_is_lazy() {
        let recorder = Arc::new(Recorder::default());
        let geocoder = Geocoder::new(recorder.clone(), Duration::from_millis(1100));

        let mut results = Box::pin(geocoder.geocode_all(vec![item("Rua A"), item("Rua B")]));
        assert!(recorder.calls().is_empty());

        results.next().await;
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_map_plan_only_geocodes_missing_coordinates() {
        let customer = |id: &str, coordinates: Option<(f64, f64)>| Customer {
            id: id.into(),
            name: format!("Customer {id}"),
            document: "1".into(),
            address: format!("Rua {id}"),
            contact_name: "Marta".into(),
            phone: String::new(),
            email: String::new(),
            active: true,
            created_at: None,
            lat: coordinates.map(|c| c.0),
            lng: coordinates.map(|c| c.1),
        };
        let customers = [
            customer("a", Some((-23.0, -46.0))),
            customer("b", None),
            customer("c", None),
        ];

        let mut plan = MapPlan::new(&customers, &[]);
        assert_eq!(plan.placed.len(), 1);
        assert_eq!(plan.placed[0].status, SiteStatus::Stable);
        assert_eq!(
            plan.geocode_items()
                .iter()
                .map(|i| i.address.as_str())
                .collect::<Vec<_>>(),
            ["Rua b", "Rua c"]
        );

        let found = GeoResult {
            address: "Rua c".into(),
            label: "Customer c".into(),
            lat: -22.9,
            lng: -43.2,
        };
        let unplaced = plan.place(vec![None, Some(found)], &[]);
        assert_eq!(unplaced[0].id.as_str(), "b");
        assert_eq!(plan.placed.len(), 2);
        assert_eq!(plan.placed[1].customer_id.as_str(), "c");
    }
}
