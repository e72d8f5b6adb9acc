mod my_inventory_view;
