// One-time logging bring-up; safe to call from multiple tests
pub fn init_logging()
{
    #[cfg(debug_assertions)]
    let default_log_levels = (log::LevelFilter::Warn, log::LevelFilter::Debug);
    #[cfg(not(debug_assertions))]
    let default_log_levels = (log::LevelFilter::Warn, log::LevelFilter::Info);

    let _ = colog::basic_builder()
        .filter_level(default_log_levels.0)
        .filter_module("nab_mirra", default_log_levels.1)
        .filter_module("math_mirra", default_log_levels.1)
        .filter_module("puppet_mirra", default_log_levels.1)
        .filter_module("mirra", default_log_levels.1)
        .parse_default_env()
        .try_init();
}
