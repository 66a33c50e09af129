pub mod proof_tests;
pub mod verify_tests;
