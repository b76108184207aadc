/// Generate the default TOML config content with comments.
pub(super) fn default_config_toml() -> &'static str {
    r##"# DevRadar Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[search]
# base_url = "http://localhost:3333"   # GET {base_url}/search
# timeout_secs = 10                    # 1-300
# connect_timeout_secs = 5             # 1-60

[realtime]
# url = "ws://localhost:3333/realtime"
# heartbeat_interval = 25              # 1-300 seconds
# reconnect_delay = 1                  # seconds, doubles on each failure
# max_reconnect_delay = 30             # seconds
# connect_timeout = 15                 # 1-120 seconds

[location]
# high_accuracy = true
# initial_delta = 0.04                 # degrees, 0.0001-90
# debounce_ms = 400                    # 0-10000
# min_shift = 0.1                      # 0.0-1.0, fraction of the visible span
# search_on_move = true

[logging]
# level = "devradar=info"              # any RUST_LOG style directive
"##
}
