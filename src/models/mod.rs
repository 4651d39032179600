// Domain models: raw forecast samples, per-day summaries, response payload

mod forecast;
mod sample;
mod summary;

pub use forecast::{Coordinates, ForecastResponse};
pub use sample::{PollutionSample, Timestamped, WeatherSample};
pub use summary::{PollutionDay, WeatherDay};
