mod basic_integration;
mod store_properties;
