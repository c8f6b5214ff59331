//! # vitibrasil
//!
//! A JSON API over the Embrapa Vitibrasil portal, which publishes viticulture
//! statistics for Rio Grande do Sul as HTML tables.
//!
//! The portal addresses its pages with positional codes
//! (`index.php?opcao=opt_05&ano=2010&subopcao=subopt_03`). This crate accepts
//! readable names instead (`option=importacao&year=2010&sub_option=uvas_frescas`),
//! validates them against the portal's fixed vocabulary, fetches the page and
//! returns its data table as JSON.
//!
//! ## Resolving parameters
//!
//! ```rust
//! use vitibrasil::params::QueryParameters;
//!
//! let resolved = QueryParameters::from_query("option=processamento&year=2001")?
//!     .resolve()?;
//!
//! assert_eq!(resolved.to_query(), "opcao=opt_03&ano=2001&subopcao=subopt_01");
//! assert_eq!(resolved.original_sub_option(), Some("viniferas"));
//! # Ok::<(), vitibrasil::params::ValidationError>(())
//! ```
//!
//! ## Running the API
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use vitibrasil::portal::{DEFAULT_PORTAL_URL, Portal};
//! use vitibrasil::routes::{self, AppState};
//! use vitibrasil::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vitibrasil::Error> {
//!     let state = AppState {
//!         portal: Portal::new(DEFAULT_PORTAL_URL, Duration::from_secs(30)),
//!         public_url: "http://127.0.0.1:5000".into(),
//!         pretty_json: true,
//!     };
//!     Server::bind("127.0.0.1:5000".parse().unwrap())
//!         .serve(routes::app(Arc::new(state)))
//!         .await
//! }
//! ```

mod error;
mod server;

pub mod catalog;
pub mod config;
pub mod health;
pub mod http;
pub mod logging;
pub mod params;
pub mod portal;
pub mod routes;
pub mod scrape;

pub use error::Error;
pub use server::Server;
