mod middleware_test;
