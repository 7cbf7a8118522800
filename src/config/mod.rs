//! Settings for the binary and for anything that needs a connection pool.
//!
//! Sources, lowest precedence first: built-in defaults, `config/default.toml`,
//! `config/$RUN_ENV.toml`, `APP__SECTION__KEY` variables, then `DATABASE_URL`.
//! A `.env` file in the working directory is read before any of them.
//!
//! ```rust,ignore
//! let settings = aroma_data::config::Settings::load()?;
//! let pool = aroma_data::infrastructure::database::create_pool(&settings.database).await?;
//! ```

mod settings;

pub use settings::*;
