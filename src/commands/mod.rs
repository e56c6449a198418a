/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `verify` — Check the authorization server connection
- `token`  — Obtain an access token with client credentials

Each handler builds the reqwest transport from the loaded configuration and
delegates to the `auth` module. Library errors are converted into
[`CredhubError`](crate::error::CredhubError) on the way out, which is where
they are classified into user-facing messages.
*/

pub mod token;
pub mod verify;
