pub use routesplit_test_utils::init_tracing;
