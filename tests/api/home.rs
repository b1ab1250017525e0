use crate::helpers::spawn_app;

#[tokio::test]
async fn the_home_page_is_publicly_accessible() {
    let app = spawn_app().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
}
