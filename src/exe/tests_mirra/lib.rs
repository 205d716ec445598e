mod common;
mod retarget_tests;
