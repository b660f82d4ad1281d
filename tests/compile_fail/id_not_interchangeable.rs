// ABOUTME: Compile-fail test verifying DeploymentId and TaskId are not interchangeable.
// ABOUTME: This test should fail to compile, validating type safety.

use stride::types::{DeploymentId, TaskId};

fn takes_deployment_id(_id: DeploymentId) {}

fn main() {
    let task_id = TaskId::new("web.1234");
    takes_deployment_id(task_id); // ERROR: expected DeploymentId, found TaskId
}
