mod category_service_tests;
