pub(super) fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

pub(super) fn default_request_timeout() -> u64 {
    10
}

pub(super) fn default_poll_timeout() -> u64 {
    30
}

pub(super) fn default_poll_interval() -> u64 {
    1000
}

pub(super) fn default_queue_capacity() -> usize {
    64
}

pub(super) fn default_error_capacity() -> usize {
    16
}
