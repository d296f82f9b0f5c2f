//! Validation behavior of the API surface, exercised without a live store.
//!
//! The driver hands out lazy handles, so an operation that fails validation
//! returns before anything touches the network.

use employee_directory::ErrorCode;
use employee_directory::api::EmployeeApi;
use employee_directory::models::{CreateEmployee, UpdateEmployee};
use mongodb::Client;
use mongodb::options::ClientOptions;

async fn offline_api() -> EmployeeApi {
    let options = ClientOptions::parse("mongodb://127.0.0.1:27017")
        .await
        .expect("static uri parses");
    let client = Client::with_options(options).expect("lazy client");
    EmployeeApi::new(client.database("employee_directory_test"))
}

#[tokio::test]
async fn rejects_missing_and_malformed_ids() {
    let api = offline_api().await;

    let err = api.get_employee_details("").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Employee ID is required");
    assert_eq!(err.path, "getEmployeeDetails");

    let err = api.get_employee_details("not-a-hex-id").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Invalid employee ID format");

    let err = api
        .update_employee("zzz", &UpdateEmployee::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Invalid employee ID format");
    assert_eq!(err.path, "updateEmployee");

    let err = api.delete_employee("   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Employee ID is required");
    assert_eq!(err.path, "deleteEmployee");
}

#[tokio::test]
async fn rejects_blank_filter_arguments() {
    let api = offline_api().await;

    let err = api.get_employees_by_department("   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Department name is required");
    assert_eq!(err.path, "getEmployeesByDepartment");

    let err = api.search_employees_by_name("").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Search term is required");
    assert_eq!(err.path, "searchEmployeesByName");
}

#[tokio::test]
async fn rejects_invalid_creation_fields() {
    let api = offline_api().await;

    let err = api
        .add_employee(CreateEmployee {
            name: "  ".to_string(),
            position: "Full Stack Developer".to_string(),
            department: "Engineering".to_string(),
            salary: 75000.0,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Name is required");
    assert_eq!(err.path, "addEmployee");

    let err = api
        .add_employee(CreateEmployee {
            name: "Ankit Pathak".to_string(),
            position: "Full Stack Developer".to_string(),
            department: "".to_string(),
            salary: 75000.0,
        })
        .await
        .unwrap_err();
    assert_eq!(err.message, "Department is required");

    let err = api
        .add_employee(CreateEmployee {
            name: "Ankit Pathak".to_string(),
            position: "Full Stack Developer".to_string(),
            department: "Engineering".to_string(),
            salary: -1.0,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadInput);
    assert_eq!(err.message, "Valid salary is required");
}
