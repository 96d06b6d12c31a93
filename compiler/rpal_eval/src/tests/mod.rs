mod unary_operators_tests;
