mod tana_client;
