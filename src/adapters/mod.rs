//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements         | Connects to                  |
//! |---------------|--------------------|------------------------------|
//! | `hardware`    | SensorPort         | MAX31855 thermocouple probe  |
//! |               | DisplayPort        | screen                       |
//! |               | GraphPort          | plot renderer                |
//! |               | IndicatorPort      | activity LED (GPIO 21)       |
//! |               | TickerPort         | sampling ticker re-arm       |
//! | `csv_log`     | LogPort            | rotating CSV file            |
//! | `config_file` | ConfigPort         | JSON config file             |
//! | `console`     | DisplayPort        | terminal (text frames)       |
//! |               | event source       | stdin (touch, gpio, keys)    |
//! | `graph`       | GraphPort          | gnuplot data file            |
//! | `time`        | -                  | monotonic clock              |

pub mod config_file;
pub mod console;
pub mod csv_log;
pub mod graph;
pub mod hardware;
pub mod time;
