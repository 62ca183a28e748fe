mod basic_auth;
