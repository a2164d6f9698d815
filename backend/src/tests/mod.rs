mod common;

mod indexnow_test;
