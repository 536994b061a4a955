//! User mutations: account creation and login. Both are open to anonymous
//! callers.

use super::prelude::*;

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Register a user account. Accounts are provisioned with the
    /// deployment-configured signup credential; the API takes no password.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
    ) -> Result<User> {
        let auth = ctx.data_unchecked::<AuthService>();

        let args = errors::args_value(json!({
            "username": &username,
            "favoriteGenre": &favorite_genre,
        }));

        let user = auth
            .create_user(&username, &favorite_genre)
            .await
            .map_err(|e| errors::from_auth(e, args))?;

        Ok(user_to_graphql(user))
    }

    /// Exchange credentials for a bearer token. Unknown usernames and wrong
    /// passwords produce the identical error; the password is never echoed
    /// back.
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<Token> {
        let auth = ctx.data_unchecked::<AuthService>();

        let args = errors::args_value(json!({ "username": &username }));

        let value = auth
            .login(&username, &password)
            .await
            .map_err(|e| errors::from_auth(e, args))?;

        Ok(Token { value })
    }
}
