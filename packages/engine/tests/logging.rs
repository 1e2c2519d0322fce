#[test]
fn init_installs_the_logger_once() {
    tower_vision_engine::init();
    assert_eq!(log::max_level(), log::LevelFilter::Info);
    assert!(log::log_enabled!(log::Level::Info));

    // Already installed: the verbose level is not applied
    tower_vision_engine::init_verbose();
    assert_eq!(log::max_level(), log::LevelFilter::Info);
    assert!(!log::log_enabled!(log::Level::Debug));
}
