//! Number formats for the templates: German decimal comma, one decimal.

use minijinja::Environment;

pub(crate) fn register(env: &mut Environment<'_>) {
    env.add_filter("number", number);
    env.add_filter("temperature", temperature);
    env.add_filter("humidity", humidity);
    env.add_filter("vapor", vapor);
}

fn number(value: f64) -> String {
    format!("{value:.1}").replace('.', ",")
}

fn temperature(value: f64) -> String {
    format!("{} °C", number(value))
}

fn humidity(value: f64) -> String {
    format!("{} %", number(value))
}

fn vapor(value: f64) -> String {
    format!("{} g/m³", number(value))
}
