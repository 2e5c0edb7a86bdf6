mod domain_tests;
mod service_tests;
