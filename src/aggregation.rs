// Daily bucketing: split a chronologically ordered sample stream into calendar-day runs,
// then reduce each run into one summary (mean / max, rounded to 2 decimals).

use chrono::NaiveDate;
use tracing::warn;

use crate::calendar::{Calendar, weekday_name};
use crate::models::{PollutionDay, PollutionSample, Timestamped, WeatherDay, WeatherSample};

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// A maximal run of consecutive samples sharing one calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayBucket<'a, S> {
    /// Date of the bucket's first sample.
    pub date: NaiveDate,
    pub samples: &'a [S],
}

impl<S> DayBucket<'_, S> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.date)
    }
}

/// Reduces one non-empty day bucket into a summary record.
pub trait DayReducer {
    type Sample: Timestamped;
    type Summary;

    fn reduce(&self, bucket: &DayBucket<'_, Self::Sample>) -> Self::Summary;
}

/// Partitions `samples` into calendar-day buckets, in input order.
///
/// A bucket keeps consuming samples while their date equals the date of the bucket's
/// first sample; the first differing sample starts the next bucket. Boundaries depend only
/// on dates, never on sample counts. Samples whose timestamp has no calendar date are skipped.
pub fn split_into_days<'a, S: Timestamped>(
    samples: &'a [S],
    calendar: &Calendar,
) -> Vec<DayBucket<'a, S>> {
    let mut buckets = Vec::new();
    let mut index = 0;
    while index < samples.len() {
        let reference = samples[index].timestamp();
        let Some(date) = calendar.civil_date(reference) else {
            warn!(timestamp = reference, "skipping sample with unrepresentable timestamp");
            index += 1;
            continue;
        };
        let count = samples[index..]
            .iter()
            .take_while(|s| calendar.civil_date(s.timestamp()) == Some(date))
            .count();
        buckets.push(DayBucket {
            date,
            samples: &samples[index..index + count],
        });
        index += count;
    }
    buckets
}

/// Buckets `samples` by calendar day and reduces each bucket. Empty input yields an empty vec.
pub fn aggregate<R: DayReducer>(
    samples: &[R::Sample],
    calendar: &Calendar,
    reducer: &R,
) -> Vec<R::Summary> {
    split_into_days(samples, calendar)
        .iter()
        .map(|bucket| reducer.reduce(bucket))
        .collect()
}

/// Mean temperature (°C), mean wind speed, and mean rainfall over the intervals that reported rain.
/// A day where no interval reported rain gets a rainfall level of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherReducer;

impl DayReducer for WeatherReducer {
    type Sample = WeatherSample;
    type Summary = WeatherDay;

    fn reduce(&self, bucket: &DayBucket<'_, WeatherSample>) -> WeatherDay {
        let mut temperature_sum = 0.0;
        let mut wind_speed_sum = 0.0;
        let mut rainfall_sum = 0.0;
        let mut rainfall_count = 0usize;
        for s in bucket.samples {
            temperature_sum += s.temperature;
            wind_speed_sum += s.wind_speed;
            if let Some(rain) = s.rainfall_level {
                rainfall_sum += rain;
                rainfall_count += 1;
            }
        }
        let count = bucket.len();

        WeatherDay {
            day: bucket.day_name().to_string(),
            temperature: round2(kelvin_to_celsius(mean(temperature_sum, count))),
            wind_speed: round2(mean(wind_speed_sum, count)),
            rainfall_level: round2(mean(rainfall_sum, rainfall_count)),
        }
    }
}

/// Mean PM2.5 (rounded) and the raw daily maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollutionReducer;

impl DayReducer for PollutionReducer {
    type Sample = PollutionSample;
    type Summary = PollutionDay;

    fn reduce(&self, bucket: &DayBucket<'_, PollutionSample>) -> PollutionDay {
        let sum: f64 = bucket.samples.iter().map(|s| s.pm2_5).sum();
        let max = bucket
            .samples
            .iter()
            .map(|s| s.pm2_5)
            .fold(f64::NEG_INFINITY, f64::max);

        PollutionDay {
            day: bucket.day_name().to_string(),
            pm2_5: round2(mean(sum, bucket.len())),
            max_pm2_5: if bucket.is_empty() { 0.0 } else { max },
        }
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Rounds half-up to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_up() {
        assert_eq!(round2(6.666_666), 6.67);
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(0.0, 0), 0.0);
        assert_eq!(mean(6.0, 3), 2.0);
    }

    #[test]
    fn kelvin_offset() {
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
        assert_eq!(round2(kelvin_to_celsius(300.0)), 26.85);
    }
}
