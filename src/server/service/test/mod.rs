mod license;
