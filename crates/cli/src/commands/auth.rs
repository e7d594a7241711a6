//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! ff-cli login -e sarah.johnson@email.com -p secret
//! ff-cli whoami
//! ff-cli profile set-image file:///home/sarah/me.jpg
//! ff-cli logout
//! ```

#![allow(clippy::print_stdout)]

use furniture_finder_core::User;
use furniture_finder_storefront::error::AppError;
use furniture_finder_storefront::state::AppState;
use furniture_finder_storefront::storage::KeyValueStore;

pub async fn login<S: KeyValueStore>(
    state: &mut AppState<S>,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    let user = state.login(email, password).await?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn logout<S: KeyValueStore>(state: &mut AppState<S>) {
    state.logout().await;
    println!("Logged out");
}

pub fn whoami<S: KeyValueStore>(state: &AppState<S>) {
    match state.current_user() {
        Some(user) => print_user(user),
        None => println!("Not logged in"),
    }
}

pub async fn set_profile_image<S: KeyValueStore>(
    state: &mut AppState<S>,
    reference: &str,
) -> Result<(), AppError> {
    if reference.trim().is_empty() {
        return Err(AppError::BadRequest("image reference must not be blank".to_string()));
    }

    let user = state.set_profile_image(reference.trim()).await?;
    print_user(&user);
    Ok(())
}

fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:    {}", user.id);
    if let Some(image) = &user.profile_image {
        println!("  photo: {image}");
    }
}
