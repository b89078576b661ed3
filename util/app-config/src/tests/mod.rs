mod sdk_config;
