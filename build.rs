fn main() {
    // Flash-time configuration is baked in with `option_env!`; rebuild when it changes.
    for var in [
        "OUTLET_WIFI_SSID",
        "OUTLET_WIFI_PASS",
        "OUTLET_IP",
        "OUTLET_SUBNET",
        "OUTLET_GATEWAY",
        "OUTLET_DNS",
        "OUTLET_TITLE",
    ] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
