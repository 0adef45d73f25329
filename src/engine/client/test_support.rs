//! Mock implementation of the Docker API seam for unit tests.

use mockall::mock;

use super::{
    ApiFuture, ContainerRecord, ContainerSpec, DockerApi, ImageRecord, NetworkRecord,
    NetworkSpec, ServerVersion, VolumeRecord, VolumeSpec,
};

mock! {
    pub Api {}

    impl DockerApi for Api {
        fn ping<'a>(&'a self) -> ApiFuture<'a, ()>;
        fn server_version<'a>(&'a self) -> ApiFuture<'a, ServerVersion>;
        fn create_container<'a>(&'a self, spec: ContainerSpec) -> ApiFuture<'a, ContainerRecord>;
        fn inspect_container<'a>(&'a self, id: String) -> ApiFuture<'a, ContainerRecord>;
        fn remove_container<'a>(&'a self, id: String, force: bool) -> ApiFuture<'a, ()>;
        fn pull_image<'a>(&'a self, reference: String) -> ApiFuture<'a, ()>;
        fn inspect_image<'a>(&'a self, reference: String) -> ApiFuture<'a, ImageRecord>;
        fn remove_image<'a>(&'a self, reference: String, force: bool) -> ApiFuture<'a, ()>;
        fn create_network<'a>(&'a self, spec: NetworkSpec) -> ApiFuture<'a, NetworkRecord>;
        fn inspect_network<'a>(&'a self, id: String) -> ApiFuture<'a, NetworkRecord>;
        fn remove_network<'a>(&'a self, id: String) -> ApiFuture<'a, ()>;
        fn create_volume<'a>(&'a self, spec: VolumeSpec) -> ApiFuture<'a, VolumeRecord>;
        fn inspect_volume<'a>(&'a self, name: String) -> ApiFuture<'a, VolumeRecord>;
        fn remove_volume<'a>(&'a self, name: String, force: bool) -> ApiFuture<'a, ()>;
    }
}

/// A Docker API error carrying an HTTP status.
pub fn server_error(status_code: u16, message: &str) -> bollard::errors::Error {
    bollard::errors::Error::DockerResponseServerError {
        status_code,
        message: String::from(message),
    }
}

/// A mock whose ping answers immediately with `result`.
pub fn api_with_ping(result: fn() -> Result<(), bollard::errors::Error>) -> MockApi {
    let mut api = MockApi::new();
    api.expect_ping()
        .times(1)
        .returning(move || Box::pin(async move { result() }));
    api
}
